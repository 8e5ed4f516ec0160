/// Clave de localStorage para el bearer token
pub const TOKEN_STORAGE_KEY: &str = "accessToken";

/// Clave de localStorage para la identidad serializada del usuario
pub const USER_STORAGE_KEY: &str = "userDetails";

/// Texto mostrado por el ErrorBoundary cuando un render falla
pub const RENDER_FALLBACK_MESSAGE: &str = "Something went wrong in this component.";
