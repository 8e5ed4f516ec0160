// ============================================================================
// API CLIENT - Gateway único hacia el backend REST
// ============================================================================
// Adjunta el bearer token a cada request y, ante un 401, fuerza el logout
// antes de devolver el error al llamador.
// ============================================================================

use std::rc::Rc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::services::http::{Body, FormPart, HttpRequest, HttpResponse, HttpTransport, Method};
use crate::state::SessionStore;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP 401: {}", .message.as_deref().unwrap_or("Unauthorized"))]
    Unauthorized { message: Option<String> },
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Campo `message` del cuerpo de error, si el backend lo envió
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Http { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Mensaje listo para mostrar: el del servidor o el fallback genérico
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

/// Gateway HTTP. Clonar es barato (Rc).
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(HttpRequest::new(Method::Get, self.url(path))).await?;
        decode(&response)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_json(Method::Post, path, body).await?;
        decode(&response)
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_json(Method::Put, path, body).await?;
        decode(&response)
    }

    /// Request sin cuerpo cuya respuesta no interesa (el llamador re-sincroniza)
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.execute(HttpRequest::new(method, self.url(path)))
            .await
            .map(|_| ())
    }

    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        parts: Vec<FormPart>,
    ) -> Result<(), ApiError> {
        let mut request = HttpRequest::new(method, self.url(path));
        request.body = Body::Multipart(parts);
        self.execute(request).await.map(|_| ())
    }

    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<HttpResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let json =
            serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut request = HttpRequest::new(method, self.url(path));
        request.body = Body::Json(json);
        self.execute(request).await
    }

    /// Punto único de salida: token siempre leído de storage en el momento
    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.session.persisted_token() {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let method = request.method;
        let url = request.url.clone();
        log::debug!("📡 [API] {:?} {}", method, url);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {:?} {} falló: {}", method, url, e);
            e
        })?;

        if response.status == 401 {
            log::warn!("⚠️ [API] Unauthorized - Login expired ({:?} {})", method, url);
            self.session.expire();
            return Err(ApiError::Unauthorized {
                message: error_message(&response.body),
            });
        }

        if !response.ok() {
            log::error!("❌ [API] HTTP {} en {:?} {}", response.status, method, url);
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{customer, Fixture};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn attaches_bearer_token_when_present() {
        let fx = Fixture::new();
        fx.transport.respond(200, json!([]));
        fx.transport.respond(200, json!([]));

        let _: serde_json::Value = block_on(fx.api.get("/products/all")).unwrap();
        fx.session.login("tok123", customer()).unwrap();
        let _: serde_json::Value = block_on(fx.api.get("/products/all")).unwrap();

        let requests = fx.transport.requests();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(requests[1].header("Authorization"), Some("Bearer tok123"));
        assert_eq!(requests[1].url, "http://api.test/api/products/all");
    }

    #[test]
    fn unauthorized_forces_logout_once_and_propagates() {
        let fx = Fixture::signed_in(customer());
        let clears = Rc::new(Cell::new(0));
        let counter = clears.clone();
        fx.session.subscribe(move || counter.set(counter.get() + 1));

        fx.transport.respond(401, json!({"message": "jwt expired"}));
        let err = block_on(fx.api.send_empty(Method::Put, "/cart/increase/p1")).unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("fallback"), "jwt expired");
        assert!(!fx.session.is_authenticated());
        assert_eq!(fx.session.persisted_token(), None);
        assert_eq!(clears.get(), 1);

        // Un segundo 401 ya no encuentra sesión que limpiar
        fx.transport.respond(401, json!({}));
        let _ = block_on(fx.api.send_empty(Method::Get, "/orders/get"));
        assert_eq!(clears.get(), 1);
    }

    #[test]
    fn other_errors_pass_through_untouched() {
        let fx = Fixture::signed_in(customer());
        fx.transport.respond(500, json!({"message": "Out of stock"}));
        let err = block_on(fx.api.send_empty(Method::Post, "/cart/add")).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: Some("Out of stock".to_string())
            }
        );
        assert!(fx.session.is_authenticated());

        fx.transport.respond_raw(404, "<html>not found</html>");
        let err = block_on(fx.api.send_empty(Method::Get, "/nope")).unwrap_err();
        assert_eq!(err.user_message("Failed to fetch cart"), "Failed to fetch cart");
    }

    #[test]
    fn network_failure_has_no_server_message() {
        let fx = Fixture::new();
        fx.transport.fail_network();
        let err = block_on(fx.api.get::<serde_json::Value>("/cart/all")).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.user_message("Failed to fetch cart"), "Failed to fetch cart");
    }

    #[test]
    fn json_bodies_are_serialized() {
        let fx = Fixture::new();
        fx.transport.respond(200, json!({"ok": true}));
        let _: serde_json::Value =
            block_on(fx.api.post_json("/users/login", &json!({"email": "a@b.c"}))).unwrap();
        let request = &fx.transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        match &request.body {
            Body::Json(json) => assert!(json.contains("a@b.c")),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn undecodable_success_is_parse_error() {
        let fx = Fixture::new();
        fx.transport.respond_raw(200, "not json");
        let err = block_on(fx.api.get::<Vec<String>>("/products/all")).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
