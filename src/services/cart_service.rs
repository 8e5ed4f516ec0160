// ============================================================================
// CART SERVICE - Endpoints /cart/* (solo comunicación, sin estado)
// ============================================================================

use crate::models::{AddToCartRequest, AddToCartResponse, Cart, CartItem};
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::http::Method;

#[derive(Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Carrito completo del usuario
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        let cart: Cart = self.api.get("/cart/all").await?;
        Ok(cart.items)
    }

    /// Añadir una unidad; devuelve las líneas autoritativas del carrito
    pub async fn add(&self, product_id: &str) -> Result<Vec<CartItem>, ApiError> {
        let response: AddToCartResponse = self
            .api
            .post_json("/cart/add", &AddToCartRequest::single(product_id))
            .await?;
        Ok(response.into_items())
    }

    pub async fn increase(&self, product_id: &str) -> Result<(), ApiError> {
        self.api
            .send_empty(Method::Put, &format!("/cart/increase/{}", product_id))
            .await
    }

    pub async fn decrease(&self, product_id: &str) -> Result<(), ApiError> {
        self.api
            .send_empty(Method::Put, &format!("/cart/decrease/{}", product_id))
            .await
    }

    pub async fn remove(&self, product_id: &str) -> Result<(), ApiError> {
        self.api
            .send_empty(Method::Delete, &format!("/cart/remove/{}", product_id))
            .await
    }

    pub async fn clear(&self) -> Result<(), ApiError> {
        self.api.send_empty(Method::Delete, "/cart/clear").await
    }
}
