// ============================================================================
// ROUTE GUARD - Decide si una navegación entra, espera o se redirige
// ============================================================================
// Se evalúa en cada navegación con el snapshot actual de la sesión; nunca se
// cachea la decisión.
// ============================================================================

use std::fmt;

use crate::routing::route::{Access, Route};
use crate::state::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Hidratación en curso: mostrar espera, sin redirigir todavía
    Pending,
    RedirectToLogin,
    RedirectToHome,
}

pub fn evaluate(session: &Session, access: &Access) -> GuardDecision {
    let required_role = match access {
        Access::Public => return GuardDecision::Allow,
        Access::Authenticated => None,
        Access::Role(role) => Some(*role),
    };

    if session.loading {
        return GuardDecision::Pending;
    }
    if !session.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    match (required_role, session.role()) {
        (None, _) => GuardDecision::Allow,
        (Some(required), Some(actual)) if required == actual => GuardDecision::Allow,
        _ => GuardDecision::RedirectToHome,
    }
}

/// Resultado de una navegación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Wait,
    Redirect(Route),
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Render(route) => write!(f, "render:{}", route),
            Navigation::Wait => f.write_str("wait"),
            Navigation::Redirect(route) => write!(f, "redirect:{}", route),
        }
    }
}

pub fn resolve(session: &Session, path: &str) -> Navigation {
    let route = Route::parse(path);
    match evaluate(session, &route.access()) {
        GuardDecision::Allow => Navigation::Render(route),
        GuardDecision::Pending => Navigation::Wait,
        GuardDecision::RedirectToLogin => {
            log::info!("🔒 [ROUTER] {} requiere login", route);
            Navigation::Redirect(Route::Login)
        }
        GuardDecision::RedirectToHome => {
            log::warn!("⛔ [ROUTER] Rol insuficiente para {}", route);
            Navigation::Redirect(Route::Home)
        }
    }
}
