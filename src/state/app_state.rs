// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::rc::Rc;

use crate::state::{CartState, CatalogState, SessionStore};
use crate::utils::StoragePort;

/// Contenedores de estado compartidos por los viewmodels (se inyectan, no son globales)
#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub cart: CartState,
    pub catalog: CatalogState,
}

impl AppState {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self {
            session: SessionStore::new(storage),
            cart: CartState::new(),
            catalog: CatalogState::new(),
        }
    }
}
