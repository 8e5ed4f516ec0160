// ============================================================================
// CATALOG STATE - Productos cargados desde /products/all
// ============================================================================

use crate::models::Product;
use crate::state::reactivity::{ReactiveState, Subscription};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogSnapshot {
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    /// true tras el primer fetch exitoso
    pub loaded: bool,
}

#[derive(Clone, Default)]
pub struct CatalogState {
    inner: ReactiveState<CatalogSnapshot>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) {
        self.inner.update(|catalog| {
            catalog.loading = true;
            catalog.error = None;
        });
    }

    pub fn replace(&self, items: Vec<Product>) {
        self.inner.update(|catalog| {
            catalog.items = items;
            catalog.loading = false;
            catalog.loaded = true;
        });
    }

    pub fn fail(&self, message: String) {
        self.inner.update(|catalog| {
            catalog.loading = false;
            catalog.error = Some(message);
        });
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.inner.get()
    }

    pub fn products(&self) -> Vec<Product> {
        self.inner.with(|catalog| catalog.items.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.with(|catalog| catalog.loaded)
    }

    pub fn find(&self, id: &str) -> Option<Product> {
        self.inner
            .with(|catalog| catalog.items.iter().find(|p| p.id == id).cloned())
    }

    /// Búsqueda case-insensitive por título o descripción
    pub fn search(&self, query: &str) -> Vec<Product> {
        self.inner.with(|catalog| {
            catalog
                .items
                .iter()
                .filter(|p| p.matches(query))
                .cloned()
                .collect()
        })
    }

    /// Misma categoría, excluyendo el propio producto
    pub fn related(&self, id: &str) -> Vec<Product> {
        self.inner.with(|catalog| {
            let Some(main) = catalog.items.iter().find(|p| p.id == id) else {
                return Vec::new();
            };
            catalog
                .items
                .iter()
                .filter(|p| p.id != main.id && p.same_category(main))
                .cloned()
                .collect()
        })
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.inner.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.inner.unsubscribe(subscription)
    }
}
