// ============================================================================
// HTTP TRANSPORT - Puerto de transporte (gloo-net en el navegador)
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::RequestBuilder;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::services::api_client::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn to_gloo(self) -> gloo_net::http::Method {
        match self {
            Method::Get => gloo_net::http::Method::GET,
            Method::Post => gloo_net::http::Method::POST,
            Method::Put => gloo_net::http::Method::PUT,
            Method::Delete => gloo_net::http::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: File },
}

#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(String),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transporte HTTP. Un solo hilo (WASM), por eso `?Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Transporte real sobre fetch vía gloo-net. Sin timeout propio: se usan los
/// defaults del navegador.
#[derive(Clone, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = RequestBuilder::new(&request.url).method(request.method.to_gloo());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Body::Empty => builder.build(),
            Body::Json(json) => builder
                .header("Content-Type", "application/json")
                .body(JsValue::from_str(&json)),
            // El navegador pone el boundary del multipart
            Body::Multipart(parts) => builder.body(form_data(&parts)?),
        }
        .map_err(|e| ApiError::Serialization(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn form_data(parts: &[FormPart]) -> Result<FormData, ApiError> {
    let js_err = |e: JsValue| ApiError::Serialization(format!("FormData: {:?}", e));
    let form = FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value).map_err(js_err)?,
            FormPart::File { name, file } => form.append_with_blob(name, file).map_err(js_err)?,
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut request = HttpRequest::new(Method::Get, "http://x/api/cart/all");
        request
            .headers
            .push(("Authorization".to_string(), "Bearer t".to_string()));
        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert_eq!(request.header("Content-Type"), None);
    }

    #[test]
    fn only_2xx_is_ok() {
        assert!(HttpResponse { status: 201, body: String::new() }.ok());
        assert!(!HttpResponse { status: 401, body: String::new() }.ok());
        assert!(!HttpResponse { status: 302, body: String::new() }.ok());
    }
}
