pub mod auth;
pub mod product;
pub mod cart;
pub mod address;
pub mod order;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, Role, User};
pub use product::{Product, ProductDraft, ProductsResponse};
pub use cart::{cart_total, AddToCartRequest, AddToCartResponse, Cart, CartItem, ProductRef};
pub use address::{Address, AddressField, AddressForm, AddressesResponse, FieldError};
pub use order::{
    CreateOrderRequest, Order, OrderCustomer, OrderItem, OrderStatus, OrdersResponse,
    PaymentMethod, StatusUpdateRequest,
};
