use web_sys::File;

use crate::models::{Product, ProductDraft, ProductsResponse};
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::http::{FormPart, Method};

/// Endpoints /products/* (catálogo público + gestión admin)
#[derive(Clone)]
pub struct ProductService {
    api: ApiClient,
}

impl ProductService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let products: ProductsResponse = self.api.get("/products/all").await?;
        log::info!("📦 [PRODUCTS] {} productos obtenidos", products.len());
        Ok(products)
    }

    pub async fn create(&self, draft: &ProductDraft, image: Option<File>) -> Result<(), ApiError> {
        self.api
            .send_multipart(Method::Post, "/products/add", multipart(draft, image))
            .await
    }

    /// La imagen solo se envía si se eligió una nueva
    pub async fn update(
        &self,
        product_id: &str,
        draft: &ProductDraft,
        image: Option<File>,
    ) -> Result<(), ApiError> {
        self.api
            .send_multipart(
                Method::Put,
                &format!("/products/{}", product_id),
                multipart(draft, image),
            )
            .await
    }

    pub async fn delete(&self, product_id: &str) -> Result<(), ApiError> {
        self.api
            .send_empty(Method::Delete, &format!("/products/{}", product_id))
            .await
    }
}

fn multipart(draft: &ProductDraft, image: Option<File>) -> Vec<FormPart> {
    let mut parts: Vec<FormPart> = draft
        .text_fields()
        .into_iter()
        .map(|(name, value)| FormPart::Text {
            name: name.to_string(),
            value,
        })
        .collect();
    if let Some(file) = image {
        parts.push(FormPart::File {
            name: "image".to_string(),
            file,
        });
    }
    parts
}
