// ============================================================================
// CATALOG VIEWMODEL - Listado, búsqueda y detalle de productos
// ============================================================================

use crate::models::Product;
use crate::services::{ApiClient, ProductService};
use crate::state::CatalogState;

/// Producto + relacionados para la página de detalle
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
}

#[derive(Clone)]
pub struct CatalogViewModel {
    service: ProductService,
    catalog: CatalogState,
}

impl CatalogViewModel {
    pub fn new(api: ApiClient, catalog: CatalogState) -> Self {
        Self {
            service: ProductService::new(api),
            catalog,
        }
    }

    pub async fn fetch(&self) -> Result<(), String> {
        self.catalog.begin();
        match self.service.list().await {
            Ok(products) => {
                self.catalog.replace(products);
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [PRODUCTS] Fetch error: {}", e);
                let message = e.user_message("Failed to load products");
                self.catalog.fail(message.clone());
                Err(message)
            }
        }
    }

    pub fn find(&self, product_id: &str) -> Option<Product> {
        self.catalog.find(product_id)
    }

    pub fn search(&self, query: &str) -> Vec<Product> {
        self.catalog.search(query)
    }

    /// Usa la lista en caché; solo hace fetch si el producto no está
    pub async fn detail(&self, product_id: &str) -> Result<ProductDetail, String> {
        if self.catalog.find(product_id).is_none() {
            self.fetch().await?;
        }
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| "Product not found".to_string())?;
        Ok(ProductDetail {
            related: self.catalog.related(product_id),
            product,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use futures::executor::block_on;
    use serde_json::json;

    fn catalog() -> serde_json::Value {
        json!([
            {"_id": "p1", "title": "Red Shirt", "price": 20, "category": "shirts", "description": "Cotton"},
            {"_id": "p2", "title": "Blue Shirt", "price": "18.5", "category": "Shirts"},
            {"_id": "p3", "title": "Mug", "price": 7, "category": "kitchen", "description": "Big red mug"}
        ])
    }

    #[test]
    fn detail_fetches_once_and_lists_related() {
        let fx = Fixture::new();
        let vm = CatalogViewModel::new(fx.api.clone(), fx.state.catalog.clone());
        fx.transport.respond(200, catalog());

        let detail = block_on(vm.detail("p1")).unwrap();
        assert_eq!(detail.product.title, "Red Shirt");
        let related: Vec<&str> = detail.related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(related, vec!["p2"]);

        // Segunda consulta servida desde caché
        let detail = block_on(vm.detail("p2")).unwrap();
        assert_eq!(detail.product.price, 18.5);
        assert_eq!(fx.transport.requests().len(), 1);
    }

    #[test]
    fn unknown_product_is_not_found() {
        let fx = Fixture::new();
        let vm = CatalogViewModel::new(fx.api.clone(), fx.state.catalog.clone());
        fx.transport.respond(200, catalog());
        assert_eq!(block_on(vm.detail("zzz")).unwrap_err(), "Product not found");
    }

    #[test]
    fn search_matches_title_or_description() {
        let fx = Fixture::new();
        let vm = CatalogViewModel::new(fx.api.clone(), fx.state.catalog.clone());
        fx.transport.respond(200, catalog());
        block_on(vm.fetch()).unwrap();

        let hits: Vec<String> = vm.search("RED").into_iter().map(|p| p.id).collect();
        assert_eq!(hits, vec!["p1", "p3"]);
        assert_eq!(vm.search("").len(), 3);
    }

    #[test]
    fn fetch_failure_is_recorded() {
        let fx = Fixture::new();
        let vm = CatalogViewModel::new(fx.api.clone(), fx.state.catalog.clone());
        fx.transport.fail_network();
        assert_eq!(block_on(vm.fetch()).unwrap_err(), "Failed to load products");
        let snapshot = fx.state.catalog.snapshot();
        assert!(!snapshot.loaded);
        assert_eq!(snapshot.error.as_deref(), Some("Failed to load products"));
    }
}
