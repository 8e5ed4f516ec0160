use crate::models::Order;
use crate::services::{ApiClient, OrderService};

/// "Mis pedidos" del cliente
#[derive(Clone)]
pub struct OrdersViewModel {
    orders: OrderService,
}

impl OrdersViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            orders: OrderService::new(api),
        }
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, String> {
        self.orders.mine().await.map_err(|e| {
            log::error!("❌ [ORDERS] {}", e);
            "Failed to fetch your orders.".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use crate::testing::{customer, Fixture};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn missing_orders_field_is_empty() {
        let fx = Fixture::signed_in(customer());
        let vm = OrdersViewModel::new(fx.api.clone());
        fx.transport.respond(200, json!({}));
        assert_eq!(block_on(vm.my_orders()), Ok(Vec::new()));
    }

    #[test]
    fn orders_are_decoded() {
        let fx = Fixture::signed_in(customer());
        let vm = OrdersViewModel::new(fx.api.clone());
        fx.transport.respond(
            200,
            json!({"orders": [{
                "_id": "o1",
                "user": "u-1",
                "orderItems": [{"product": "A", "name": "Shirt", "quantity": 2, "price": 10}],
                "totalPrice": 20,
                "status": "Shipped",
                "createdAt": "2024-05-01T10:00:00.000Z"
            }]}),
        );

        let orders = block_on(vm.my_orders()).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Shipped);
        assert_eq!(orders[0].order_items[0].line_total(), 20.0);
        assert!(orders[0].created_at.is_some());
    }

    #[test]
    fn failures_use_fixed_message() {
        let fx = Fixture::signed_in(customer());
        let vm = OrdersViewModel::new(fx.api.clone());
        fx.transport.respond(500, json!({"message": "db down"}));
        assert_eq!(
            block_on(vm.my_orders()).unwrap_err(),
            "Failed to fetch your orders."
        );
    }
}
