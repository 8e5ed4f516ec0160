// ============================================================================
// VIEWMODELS - Lógica de negocio por pantalla, sin dependencias de la vista
// ============================================================================

pub mod cart_viewmodel;
pub mod session_viewmodel;
pub mod catalog_viewmodel;
pub mod checkout_viewmodel;
pub mod orders_viewmodel;
pub mod admin_viewmodel;

pub use cart_viewmodel::CartViewModel;
pub use session_viewmodel::{SessionViewModel, VerificationStatus};
pub use catalog_viewmodel::{CatalogViewModel, ProductDetail};
pub use checkout_viewmodel::{AddressSubmitError, CheckoutViewModel};
pub use orders_viewmodel::OrdersViewModel;
pub use admin_viewmodel::{AdminOrdersSnapshot, AdminViewModel};
