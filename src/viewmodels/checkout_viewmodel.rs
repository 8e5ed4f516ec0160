// ============================================================================
// CHECKOUT VIEWMODEL - Dirección de envío + creación del pedido
// ============================================================================

use crate::models::{Address, AddressForm, CreateOrderRequest, FieldError, PaymentMethod};
use crate::services::{AddressService, ApiClient, OrderService};
use crate::state::{CartState, SessionStore};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressSubmitError {
    /// Validación local: no se hizo ninguna llamada remota
    #[error("Please fill all required fields!")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Message(String),
}

#[derive(Clone)]
pub struct CheckoutViewModel {
    addresses: AddressService,
    orders: OrderService,
    session: SessionStore,
    cart: CartState,
}

impl CheckoutViewModel {
    pub fn new(api: ApiClient, session: SessionStore, cart: CartState) -> Self {
        Self {
            addresses: AddressService::new(api.clone()),
            orders: OrderService::new(api),
            session,
            cart,
        }
    }

    pub async fn save_address(&self, form: &AddressForm) -> Result<String, AddressSubmitError> {
        let address = form.validate().map_err(AddressSubmitError::Validation)?;

        if self.session.persisted_token().is_none() {
            return Err(AddressSubmitError::Message("Please login first!".to_string()));
        }

        self.addresses
            .create(&address)
            .await
            .map_err(|e| AddressSubmitError::Message(e.user_message("Failed to save address!")))?;

        log::info!("📍 [CHECKOUT] Dirección guardada ({})", address.city);
        Ok("Address saved successfully!".to_string())
    }

    pub async fn load_latest_address(&self) -> Result<Option<Address>, String> {
        self.addresses.latest().await.map_err(|e| {
            log::warn!("⚠️ [CHECKOUT] No se pudo cargar la dirección: {}", e);
            "Failed to load address!".to_string()
        })
    }

    /// Crea el pedido con las líneas actuales; si sale bien vacía el carrito local
    pub async fn place_order(
        &self,
        address: Option<&Address>,
        payment: PaymentMethod,
    ) -> Result<String, String> {
        let address = address.ok_or_else(|| "Address not found!".to_string())?;
        let items = self.cart.items();
        if items.is_empty() {
            return Err("Cart is empty!".to_string());
        }

        let request = CreateOrderRequest::new(&items, address, payment).ok_or_else(|| {
            log::error!("❌ [CHECKOUT] Carrito con productos sin detalle, pedido no enviado");
            "Order failed!".to_string()
        })?;
        self.orders
            .create(&request)
            .await
            .map_err(|e| e.user_message("Order failed!"))?;

        log::info!("✅ [CHECKOUT] Pedido creado por {:.2}", request.total_price);
        self.cart.reset();
        Ok("Order Placed Successfully!".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressField;
    use crate::services::http::Body;
    use crate::testing::{cart_item, customer, Fixture};
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn viewmodel(fx: &Fixture) -> CheckoutViewModel {
        CheckoutViewModel::new(fx.api.clone(), fx.session.clone(), fx.state.cart.clone())
    }

    fn form() -> AddressForm {
        AddressForm {
            street: " Main St 1 ".to_string(),
            city: "Lahore".to_string(),
            district: "Gulberg".to_string(),
            current_address: "Flat 2".to_string(),
        }
    }

    fn address() -> Address {
        Address {
            id: Some("addr1".to_string()),
            street: "Main St 1".to_string(),
            city: "Lahore".to_string(),
            district: "Gulberg".to_string(),
            current_address: "Flat 2".to_string(),
        }
    }

    #[test]
    fn invalid_form_never_hits_the_network() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        let incomplete = AddressForm {
            city: String::new(),
            ..form()
        };

        let err = block_on(vm.save_address(&incomplete)).unwrap_err();
        assert_eq!(err.to_string(), "Please fill all required fields!");
        match err {
            AddressSubmitError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, AddressField::City);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(fx.transport.requests().is_empty());
    }

    #[test]
    fn saving_requires_login() {
        let fx = Fixture::new();
        let vm = viewmodel(&fx);
        assert_eq!(
            block_on(vm.save_address(&form())),
            Err(AddressSubmitError::Message("Please login first!".to_string()))
        );
        assert!(fx.transport.requests().is_empty());
    }

    #[test]
    fn saved_address_is_trimmed() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        fx.transport.respond(201, json!({"message": "created"}));

        assert_eq!(
            block_on(vm.save_address(&form())),
            Ok("Address saved successfully!".to_string())
        );
        match &fx.transport.requests()[0].body {
            Body::Json(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body["street"], "Main St 1");
                assert_eq!(body["currentAddress"], "Flat 2");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn latest_address_is_the_last_one() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        fx.transport.respond(
            200,
            json!({"addresses": [
                {"_id": "old", "street": "A", "city": "B", "district": "C", "currentAddress": "D"},
                {"_id": "new", "street": "E", "city": "F", "district": "G", "currentAddress": "H"}
            ]}),
        );
        fx.transport.respond(200, json!({}));

        let latest = block_on(vm.load_latest_address()).unwrap().unwrap();
        assert_eq!(latest.id.as_deref(), Some("new"));
        assert_eq!(block_on(vm.load_latest_address()), Ok(None));
    }

    #[test]
    fn order_requires_address_and_items() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        assert_eq!(
            block_on(vm.place_order(None, PaymentMethod::CashOnDelivery)).unwrap_err(),
            "Address not found!"
        );
        assert_eq!(
            block_on(vm.place_order(Some(&address()), PaymentMethod::CashOnDelivery)).unwrap_err(),
            "Cart is empty!"
        );
        assert!(fx.transport.requests().is_empty());
    }

    #[test]
    fn placed_order_clears_cart() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        fx.state
            .cart
            .replace(vec![cart_item("a", "A", 10.0, 2), cart_item("b", "B", 5.0, 1)]);
        fx.transport.respond(201, json!({"message": "ok"}));

        let message = block_on(vm.place_order(Some(&address()), PaymentMethod::Online)).unwrap();
        assert_eq!(message, "Order Placed Successfully!");
        assert!(fx.state.cart.is_empty());

        match &fx.transport.requests()[0].body {
            Body::Json(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body["totalPrice"], json!(25.0));
                assert_eq!(body["itemsPrice"], json!(25.0));
                assert_eq!(body["paymentMethod"], "Online");
                assert_eq!(body["orderItems"].as_array().unwrap().len(), 2);
                assert!(body["shippingAddress"].get("_id").is_none());
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn failed_order_keeps_cart() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        fx.state.cart.replace(vec![cart_item("a", "A", 10.0, 1)]);
        fx.transport.respond(500, json!({}));

        assert_eq!(
            block_on(vm.place_order(Some(&address()), PaymentMethod::CashOnDelivery)).unwrap_err(),
            "Order failed!"
        );
        assert_eq!(fx.state.cart.items().len(), 1);
    }

    #[test]
    fn unpopulated_lines_block_the_order() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        let items: Vec<crate::models::CartItem> =
            serde_json::from_value(json!([{"_id": "a", "product": "A", "quantity": 2}])).unwrap();
        fx.state.cart.replace(items);

        assert_eq!(
            block_on(vm.place_order(Some(&address()), PaymentMethod::CashOnDelivery)).unwrap_err(),
            "Order failed!"
        );
        assert!(fx.transport.requests().is_empty());
        assert_eq!(fx.state.cart.items().len(), 1);
    }
}
