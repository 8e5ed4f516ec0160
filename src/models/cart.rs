use std::num::NonZeroU32;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::product::Product;
use crate::utils::truncate;

/// Referencia al producto de una línea: el backend a veces hace populate y a
/// veces devuelve solo el ObjectId
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProductRef {
    Snapshot(Product),
    Id(String),
}

impl ProductRef {
    pub fn id(&self) -> &str {
        match self {
            ProductRef::Snapshot(product) => &product.id,
            ProductRef::Id(id) => id,
        }
    }

    pub fn snapshot(&self) -> Option<&Product> {
        match self {
            ProductRef::Snapshot(product) => Some(product),
            ProductRef::Id(_) => None,
        }
    }
}

/// Línea del carrito tal como la devuelve el backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default = "one", deserialize_with = "deserialize_quantity")]
    pub quantity: NonZeroU32,
}

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// Cantidades ausentes, nulas o cero cuentan como 1
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<NonZeroU32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.and_then(NonZeroU32::new).unwrap_or(NonZeroU32::MIN))
}

impl CartItem {
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().map(ProductRef::id)
    }

    pub fn product_snapshot(&self) -> Option<&Product> {
        self.product.as_ref().and_then(ProductRef::snapshot)
    }

    /// Precio unitario; 0 si el producto no viene poblado
    pub fn unit_price(&self) -> f64 {
        self.product_snapshot().map(|p| p.price).unwrap_or(0.0)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity())
    }

    pub fn title(&self) -> &str {
        self.product_snapshot()
            .map(|p| p.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or("No title")
    }

    pub fn short_description(&self) -> String {
        let description = self
            .product_snapshot()
            .and_then(|p| p.description.as_deref())
            .unwrap_or("No description available");
        truncate(description, 70)
    }

    /// Misma línea: mismo id de item o mismo producto
    pub fn same_line(&self, other: &CartItem) -> bool {
        if self.id == other.id {
            return true;
        }
        match (self.product_id(), other.product_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Σ(precio × cantidad) sobre las líneas actuales
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

/// Objeto carrito del backend (`GET /cart/all`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddToCartRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: u32,
}

impl AddToCartRequest {
    /// Siempre de a uno; el backend acumula
    pub fn single(product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AddToCartResponse {
    #[serde(default)]
    pub cart: Option<Cart>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AddToCartResponse {
    pub fn into_items(self) -> Vec<CartItem> {
        self.cart.map(|c| c.items).unwrap_or_default()
    }
}
