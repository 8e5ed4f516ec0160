// ============================================================================
// SESSION STORE - Token + usuario, persistidos en localStorage
// ============================================================================
// Único escritor del token en storage (login/logout). El gateway HTTP solo
// puede borrarlo vía `expire()` al recibir un 401.
// ============================================================================

use std::rc::Rc;

use crate::models::{Role, User};
use crate::state::reactivity::{ReactiveState, Subscription};
use crate::utils::{load_json, save_json, StorageError, StoragePort};
use crate::utils::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};

/// Snapshot de la sesión
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    /// true solo mientras se hidrata desde storage
    pub loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Login sin token")]
    EmptyToken,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn StoragePort>,
    state: ReactiveState<Session>,
}

impl SessionStore {
    /// La sesión arranca en `loading` hasta que se llama a `hydrate()`
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self {
            storage,
            state: ReactiveState::new(Session {
                loading: true,
                ..Session::default()
            }),
        }
    }

    /// Restaurar token + usuario desde storage. Cualquier fallo de lectura
    /// equivale a "sin sesión".
    pub fn hydrate(&self) {
        let token = match self.storage.get(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("⚠️ [SESSION] No se pudo leer el token: {}", e);
                None
            }
        };
        let user = match load_json::<User>(self.storage.as_ref(), USER_STORAGE_KEY) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("⚠️ [SESSION] Usuario persistido ilegible: {}", e);
                None
            }
        };

        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (Some(token), Some(user)),
            (None, None) => (None, None),
            (token, user) => {
                log::warn!(
                    "⚠️ [SESSION] Sesión persistida incompleta (token: {}, usuario: {}), descartando",
                    token.is_some(),
                    user.is_some()
                );
                self.remove_persisted();
                (None, None)
            }
        };

        if let Some(ref user) = user {
            log::info!("💾 [SESSION] Sesión restaurada para {}", user.display_name());
        }

        self.state.set(Session {
            token,
            user,
            loading: false,
        });
    }

    /// Guardar token + usuario ya obtenidos del backend. No hace llamadas de red.
    pub fn login(&self, token: &str, user: User) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        self.storage.set(TOKEN_STORAGE_KEY, token)?;
        if let Err(e) = save_json(self.storage.as_ref(), USER_STORAGE_KEY, &user) {
            // Nunca dejar un token sin usuario en storage
            let _ = self.storage.remove(TOKEN_STORAGE_KEY);
            return Err(e.into());
        }

        log::info!("🔐 [SESSION] Login de {} ({:?})", user.display_name(), user.role);
        self.state.set(Session {
            token: Some(token.to_string()),
            user: Some(user),
            loading: false,
        });
        Ok(())
    }

    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout");
        self.remove_persisted();
        self.clear_memory();
    }

    /// Logout forzado por un 401. Devuelve `false` si no había sesión que borrar,
    /// así dos 401 concurrentes solo limpian una vez.
    pub(crate) fn expire(&self) -> bool {
        let had_memory = self.state.with(|s| s.token.is_some() || s.user.is_some());
        let had_persisted = self.persisted_token().is_some();
        if !had_memory && !had_persisted {
            return false;
        }

        log::warn!("⚠️ [SESSION] Unauthorized - sesión expirada, limpiando token");
        self.remove_persisted();
        if had_memory {
            self.clear_memory();
        }
        true
    }

    /// Token leído de storage en cada request
    pub fn persisted_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("⚠️ [SESSION] No se pudo leer el token: {}", e);
                None
            }
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Session::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.state.unsubscribe(subscription)
    }

    fn remove_persisted(&self) {
        for key in [TOKEN_STORAGE_KEY, USER_STORAGE_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::error!("❌ [SESSION] Error eliminando '{}': {}", key, e);
            }
        }
    }

    fn clear_memory(&self) {
        self.state.set(Session {
            token: None,
            user: None,
            loading: false,
        });
    }
}
