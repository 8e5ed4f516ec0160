use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_DEVELOPMENT: &str = "http://localhost:5000/api";
const DEFAULT_BACKEND_PRODUCTION: &str = "https://ecombackend-production-b7eb.up.railway.app/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_PRODUCTION.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .unwrap_or(DEFAULT_BACKEND_DEVELOPMENT)
                .to_string(),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .unwrap_or(DEFAULT_BACKEND_PRODUCTION)
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("production")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        let url = match self.environment.as_str() {
            "development" => &self.backend_url_development,
            _ => &self.backend_url_production,
        };
        url.trim_end_matches('/')
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
