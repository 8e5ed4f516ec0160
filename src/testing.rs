// ============================================================================
// TESTING - Fixtures compartidas por los tests (transporte falso + storage en memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::rc::Rc;

use async_trait::async_trait;

use crate::models::{CartItem, Product, ProductRef, Role, User};
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::state::{AppState, SessionStore};
use crate::utils::MemoryStorage;

pub const TEST_BASE_URL: &str = "http://api.test/api";

pub fn admin() -> User {
    User {
        id: Some("u-admin".to_string()),
        username: Some("root".to_string()),
        email: Some("admin@shop.test".to_string()),
        role: Role::Admin,
    }
}

pub fn customer() -> User {
    User {
        id: Some("u-1".to_string()),
        username: Some("ana".to_string()),
        email: Some("ana@shop.test".to_string()),
        role: Role::Customer,
    }
}

pub fn product(id: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        title: format!("Product {}", id),
        price,
        ..Default::default()
    }
}

pub fn cart_item(id: &str, product_id: &str, price: f64, quantity: u32) -> CartItem {
    CartItem {
        id: id.to_string(),
        product: Some(ProductRef::Snapshot(product(product_id, price))),
        quantity: NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
    }
}

/// Transporte con respuestas encoladas; registra cada request enviada
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail_network(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network("connection refused".to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// "METHOD url-sin-base" de cada request, para asserts compactos
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| {
                format!(
                    "{} {}",
                    format!("{:?}", r.method).to_uppercase(),
                    r.url.trim_start_matches(TEST_BASE_URL)
                )
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

pub struct Fixture {
    pub storage: Rc<MemoryStorage>,
    pub state: AppState,
    pub session: SessionStore,
    pub transport: Rc<FakeTransport>,
    pub api: ApiClient,
}

impl Fixture {
    /// Sesión hidratada y anónima
    pub fn new() -> Self {
        let storage = Rc::new(MemoryStorage::new());
        let state = AppState::new(storage.clone());
        state.session.hydrate();
        let transport = Rc::new(FakeTransport::default());
        let api = ApiClient::new(TEST_BASE_URL, transport.clone(), state.session.clone());
        Self {
            storage,
            session: state.session.clone(),
            state,
            transport,
            api,
        }
    }

    pub fn signed_in(user: User) -> Self {
        let fx = Self::new();
        fx.session
            .login("tok", user)
            .expect("login en storage en memoria");
        fx
    }
}
