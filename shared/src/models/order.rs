//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Menu, Table, User};

/// Order lifecycle status, driven by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cooking,
    Done,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Done => "done",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Customer-facing label (id-ID)
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Menunggu Pembayaran",
            OrderStatus::Paid => "Sudah Dibayar",
            OrderStatus::Cooking => "Sedang Dimasak",
            OrderStatus::Done => "Selesai",
            OrderStatus::Cancelled => "Dibatalkan",
        }
    }

    /// No further transitions happen after these
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Done | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "cooking" => Ok(OrderStatus::Cooking),
            "done" => Ok(OrderStatus::Done),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Order line as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_id: String,
    pub menu: Option<Menu>,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub notes: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub table: Option<Table>,
    pub user_id: Option<String>,
    pub user: Option<User>,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One line of a customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub menu_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create order payload (public, customer checkout)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<OrderItemCreate>,
}

/// Update order status payload (staff)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
