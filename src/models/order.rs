use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::address::Address;
use crate::models::cart::{CartItem, ProductRef};
use crate::models::product::PLACEHOLDER_IMAGE;

/// Estado de un pedido; strings desconocidos se conservan tal cual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// Opciones del selector del dashboard
    pub const ASSIGNABLE: [OrderStatus; 3] = [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Pending" => OrderStatus::Pending,
            "Processing" => OrderStatus::Processing,
            "Shipped" => OrderStatus::Shipped,
            "Delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    CashOnDelivery,
    Online,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    /// Línea de pedido a partir de una línea del carrito; `None` si el carrito
    /// no trae el producto poblado
    pub fn from_cart_item(item: &CartItem) -> Option<Self> {
        let product = item.product_snapshot()?;
        Some(Self {
            product: Some(ProductRef::Id(product.id.clone())),
            name: product.title.clone(),
            quantity: item.quantity(),
            price: product.price,
            image: Some(
                product
                    .image
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            ),
        })
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Cliente de un pedido (poblado en el dashboard admin, id en "mis pedidos")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OrderCustomer {
    Details {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
    Id(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<OrderCustomer>,
    #[serde(rename = "orderItems", default)]
    pub order_items: Vec<OrderItem>,
    #[serde(rename = "shippingAddress", default)]
    pub shipping_address: Option<Address>,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "totalPrice", default)]
    pub total_price: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Option<Vec<Order>>,
}

impl OrdersResponse {
    pub fn into_orders(self) -> Vec<Order> {
        self.orders.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateOrderRequest {
    #[serde(rename = "orderItems")]
    pub order_items: Vec<OrderItem>,
    #[serde(rename = "shippingAddress")]
    pub shipping_address: Address,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "itemsPrice")]
    pub items_price: f64,
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
}

impl CreateOrderRequest {
    /// `None` si alguna línea no trae el producto poblado: nunca se envía un
    /// pedido con líneas omitidas
    pub fn new(items: &[CartItem], address: &Address, payment_method: PaymentMethod) -> Option<Self> {
        let order_items = items
            .iter()
            .map(OrderItem::from_cart_item)
            .collect::<Option<Vec<OrderItem>>>()?;
        let items_price = order_items.iter().map(OrderItem::line_total).sum();
        Some(Self {
            order_items,
            shipping_address: address.shipping(),
            payment_method,
            items_price,
            total_price: items_price,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}
