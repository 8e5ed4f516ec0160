use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Producto del catálogo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

impl Product {
    /// Búsqueda case-insensitive por título o descripción
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&query))
                .unwrap_or(false)
    }

    pub fn image_src(&self) -> &str {
        self.image_url
            .as_deref()
            .or(self.image.as_deref())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn same_category(&self, other: &Product) -> bool {
        match (&self.category, &other.category) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

/// El backend devuelve el precio como número, pero los productos creados por
/// multipart pueden venir con el precio como string
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a numeric string or null")
        }

        fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(value)
        }

        fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<f64, E> {
            value.trim().parse::<f64>().map_err(E::custom)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}

/// `GET /products/all` devuelve el array directamente
pub type ProductsResponse = Vec<Product>;

/// Formulario de alta/edición de producto del dashboard
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
        }
    }

    /// Validación local antes de cualquier llamada remota
    pub fn validate(&self) -> Result<f64, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| "Price must be a number".to_string())?;
        if !price.is_finite() || price < 0.0 {
            return Err("Price must be zero or more".to_string());
        }
        Ok(price)
    }

    /// Campos de texto del multipart, en el orden que espera el backend
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.trim().to_string()),
            ("price", self.price.trim().to_string()),
            ("description", self.description.trim().to_string()),
            ("category", self.category.trim().to_string()),
        ]
    }
}
