use crate::models::{
    CreateOrderRequest, MessageResponse, Order, OrderStatus, OrdersResponse, StatusUpdateRequest,
};
use crate::services::api_client::{ApiClient, ApiError};

/// Endpoints /orders/* (cliente) y /adminorders/* (dashboard)
#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> Result<MessageResponse, ApiError> {
        log::info!(
            "🧾 [ORDERS] Creando pedido con {} líneas ({:?})",
            request.order_items.len(),
            request.payment_method
        );
        self.api.post_json("/orders/create", request).await
    }

    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        let response: OrdersResponse = self.api.get("/orders/get").await?;
        Ok(response.into_orders())
    }

    pub async fn all(&self) -> Result<Vec<Order>, ApiError> {
        let response: OrdersResponse = self.api.get("/adminorders/all").await?;
        Ok(response.into_orders())
    }

    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<MessageResponse, ApiError> {
        self.api
            .put_json(
                &format!("/adminorders/status/{}", order_id),
                &StatusUpdateRequest { status },
            )
            .await
    }
}
