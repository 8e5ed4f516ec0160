pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod cart_service;
pub mod product_service;
pub mod address_service;
pub mod order_service;

pub use http::{GlooTransport, HttpTransport, Method};
pub use api_client::{ApiClient, ApiError};
pub use auth_service::AuthService;
pub use cart_service::CartService;
pub use product_service::ProductService;
pub use address_service::AddressService;
pub use order_service::OrderService;
