// ============================================================================
// CART VIEWMODEL - Reconciliación del carrito con el backend
// ============================================================================
// Cada mutación remota va seguida de un fetch completo; nunca se modifica el
// estado local antes de que el servidor confirme. Devuelve mensajes listos
// para mostrar, el estado queda en CartState.
// ============================================================================

use std::future::Future;

use crate::services::{ApiClient, ApiError, CartService};
use crate::state::CartState;

const FETCH_FALLBACK: &str = "Failed to fetch cart";
const ADD_FALLBACK: &str = "Failed to add to cart";
const UPDATE_FALLBACK: &str = "Failed to update cart";
const REMOVE_FALLBACK: &str = "Failed to remove item";
const CLEAR_FALLBACK: &str = "Failed to clear cart";
const LOGIN_REQUIRED: &str = "Please login first!";

#[derive(Clone)]
pub struct CartViewModel {
    service: CartService,
    cart: CartState,
}

impl CartViewModel {
    pub fn new(api: ApiClient, cart: CartState) -> Self {
        Self {
            service: CartService::new(api),
            cart,
        }
    }

    /// Reemplaza las líneas locales con la verdad del servidor
    pub async fn fetch(&self) -> Result<(), String> {
        self.cart.begin();
        match self.service.get_cart().await {
            Ok(items) => {
                log::info!("🛒 [CART] {} líneas sincronizadas", items.len());
                self.cart.replace(items);
                Ok(())
            }
            Err(e) => Err(self.reject(&e, FETCH_FALLBACK)),
        }
    }

    /// Una unidad por llamada; la acumulación la hace el backend
    pub async fn add_item(&self, product_id: &str) -> Result<(), String> {
        let _pending = self.cart.track(product_id);
        self.cart.begin();
        match self.service.add(product_id).await {
            Ok(items) => {
                log::info!("➕ [CART] Producto {} añadido", product_id);
                self.cart.merge(items);
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                self.cart.fail(LOGIN_REQUIRED.to_string());
                Err(LOGIN_REQUIRED.to_string())
            }
            Err(e) => Err(self.reject(&e, ADD_FALLBACK)),
        }
    }

    pub async fn increase(&self, product_id: &str) -> Result<(), String> {
        let _pending = self.cart.track(product_id);
        self.mutate_then_fetch(self.service.increase(product_id), UPDATE_FALLBACK)
            .await
    }

    pub async fn decrease(&self, product_id: &str) -> Result<(), String> {
        let _pending = self.cart.track(product_id);
        self.mutate_then_fetch(self.service.decrease(product_id), UPDATE_FALLBACK)
            .await
    }

    pub async fn remove_item(&self, product_id: &str) -> Result<(), String> {
        let _pending = self.cart.track(product_id);
        self.mutate_then_fetch(self.service.remove(product_id), REMOVE_FALLBACK)
            .await
    }

    pub async fn clear(&self) -> Result<(), String> {
        self.mutate_then_fetch(self.service.clear(), CLEAR_FALLBACK)
            .await
    }

    /// Solo local: pedido realizado o logout
    pub fn reset(&self) {
        self.cart.reset();
    }

    pub fn state(&self) -> &CartState {
        &self.cart
    }

    async fn mutate_then_fetch<F>(&self, request: F, fallback: &str) -> Result<(), String>
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        if let Err(e) = request.await {
            return Err(self.reject(&e, fallback));
        }
        self.fetch().await
    }

    fn reject(&self, error: &ApiError, fallback: &str) -> String {
        log::error!("❌ [CART] {}", error);
        let message = error.user_message(fallback);
        self.cart.fail(message.clone());
        message
    }
}
