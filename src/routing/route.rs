// ============================================================================
// ROUTES - Tabla de rutas de la tienda
// ============================================================================

use std::fmt;

use crate::models::Role;

/// Secciones del dashboard admin (`/dashboard/*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardSection {
    #[default]
    AllProducts,
    AddProduct,
    Orders,
}

impl DashboardSection {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "all-products" => Some(DashboardSection::AllProducts),
            "add-product" => Some(DashboardSection::AddProduct),
            "orders" => Some(DashboardSection::Orders),
            _ => None,
        }
    }

    fn segment(self) -> &'static str {
        match self {
            DashboardSection::AllProducts => "all-products",
            DashboardSection::AddProduct => "add-product",
            DashboardSection::Orders => "orders",
        }
    }
}

/// Qué exige una ruta para poder entrar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    VerifyEmail { token: String },
    Product { id: String },
    Checkout,
    Order,
    MyOrders,
    Cart,
    Dashboard { section: DashboardSection },
    NotFound,
}

impl Route {
    /// Ignora query string, fragmento y barras sobrantes
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["verify-email", token] => Route::VerifyEmail {
                token: (*token).to_string(),
            },
            ["product", id] => Route::Product {
                id: (*id).to_string(),
            },
            ["checkout"] => Route::Checkout,
            ["order"] => Route::Order,
            ["myorders"] => Route::MyOrders,
            ["cart"] => Route::Cart,
            ["dashboard"] => Route::Dashboard {
                section: DashboardSection::AllProducts,
            },
            ["dashboard", section] => DashboardSection::from_segment(section)
                .map(|section| Route::Dashboard { section })
                .unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::VerifyEmail { token } => format!("/verify-email/{}", token),
            Route::Product { id } => format!("/product/{}", id),
            Route::Checkout => "/checkout".to_string(),
            Route::Order => "/order".to_string(),
            Route::MyOrders => "/myorders".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Dashboard { section } => format!("/dashboard/{}", section.segment()),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Cart | Route::MyOrders => Access::Authenticated,
            Route::Dashboard { .. } => Access::Role(Role::Admin),
            _ => Access::Public,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
