// ============================================================================
// ADMIN VIEWMODEL - Dashboard: pedidos de todos los clientes + gestión de productos
// ============================================================================

use std::collections::HashMap;

use web_sys::File;

use crate::models::{Order, OrderStatus, ProductDraft};
use crate::services::{ApiClient, OrderService, ProductService};
use crate::state::{ReactiveState, Subscription};
use crate::viewmodels::catalog_viewmodel::CatalogViewModel;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AdminOrdersSnapshot {
    pub orders: Vec<Order>,
    pub loading: bool,
    pub error: Option<String>,
    /// Cambios de estado elegidos en el selector, aún no enviados
    pub staged: HashMap<String, OrderStatus>,
    /// Pedido cuyo estado se está enviando
    pub updating: Option<String>,
}

#[derive(Clone)]
pub struct AdminViewModel {
    orders: OrderService,
    products: ProductService,
    catalog: CatalogViewModel,
    dashboard: ReactiveState<AdminOrdersSnapshot>,
}

impl AdminViewModel {
    pub fn new(api: ApiClient, catalog: CatalogViewModel) -> Self {
        Self {
            orders: OrderService::new(api.clone()),
            products: ProductService::new(api),
            catalog,
            dashboard: ReactiveState::default(),
        }
    }

    // ---------------------------------------------------------------- pedidos

    pub async fn fetch_orders(&self) -> Result<(), String> {
        self.dashboard.update(|d| {
            d.loading = true;
            d.error = None;
        });
        match self.orders.all().await {
            Ok(orders) => {
                log::info!("📋 [ADMIN] {} pedidos cargados", orders.len());
                self.dashboard.update(|d| {
                    d.orders = orders;
                    d.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let message = e.user_message("Failed to fetch orders.");
                self.dashboard.update(|d| {
                    d.loading = false;
                    d.error = Some(message.clone());
                });
                Err(message)
            }
        }
    }

    pub fn stage_status(&self, order_id: &str, status: OrderStatus) {
        self.dashboard.update(|d| {
            d.staged.insert(order_id.to_string(), status);
        });
    }

    pub fn staged_status(&self, order_id: &str) -> Option<OrderStatus> {
        self.dashboard.with(|d| d.staged.get(order_id).cloned())
    }

    /// Envía el estado elegido y recarga la lista. El cambio elegido se
    /// descarta tanto si sale bien como si falla.
    pub async fn update_status(&self, order_id: &str) -> Result<String, String> {
        let status = self
            .staged_status(order_id)
            .ok_or_else(|| "Please select a new status first.".to_string())?;

        self.dashboard
            .update(|d| d.updating = Some(order_id.to_string()));
        let result = self.orders.update_status(order_id, status.clone()).await;
        self.dashboard.update(|d| {
            d.updating = None;
            d.staged.remove(order_id);
        });

        match result {
            Ok(_) => {
                log::info!("✅ [ADMIN] Pedido {} → {}", order_id, status);
                if let Err(e) = self.fetch_orders().await {
                    log::warn!("⚠️ [ADMIN] Recarga de pedidos fallida: {}", e);
                }
                Ok("Order status updated successfully!".to_string())
            }
            Err(e) => Err(e.user_message("Failed to update status.")),
        }
    }

    pub fn orders_snapshot(&self) -> AdminOrdersSnapshot {
        self.dashboard.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.dashboard.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.dashboard.unsubscribe(subscription)
    }

    // -------------------------------------------------------------- productos

    pub async fn add_product(&self, draft: &ProductDraft, image: Option<File>) -> Result<String, String> {
        draft.validate()?;
        self.products.create(draft, image).await.map_err(|e| {
            log::error!("❌ [ADMIN] Alta de producto fallida: {}", e);
            e.user_message("Failed to add product")
        })?;
        self.refresh_catalog().await;
        Ok("Product added successfully!".to_string())
    }

    /// Formulario de edición precargado con el producto del catálogo
    pub fn edit_draft(&self, product_id: &str) -> Option<ProductDraft> {
        self.catalog
            .find(product_id)
            .map(|product| ProductDraft::from_product(&product))
    }

    /// `image` solo si se eligió una nueva
    pub async fn update_product(
        &self,
        product_id: &str,
        draft: &ProductDraft,
        image: Option<File>,
    ) -> Result<String, String> {
        draft.validate()?;
        self.products
            .update(product_id, draft, image)
            .await
            .map_err(|e| e.user_message("Failed to update product!"))?;
        self.refresh_catalog().await;
        Ok("Product updated successfully!".to_string())
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<String, String> {
        self.products
            .delete(product_id)
            .await
            .map_err(|e| e.user_message("Failed to delete product!"))?;
        self.refresh_catalog().await;
        Ok("Product deleted successfully!".to_string())
    }

    async fn refresh_catalog(&self) {
        if let Err(e) = self.catalog.fetch().await {
            log::warn!("⚠️ [ADMIN] Recarga del catálogo fallida: {}", e);
        }
    }
}
