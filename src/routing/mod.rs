pub mod route;
pub mod guard;

pub use route::{Access, DashboardSection, Route};
pub use guard::{evaluate, resolve, GuardDecision, Navigation};
