//! Menu Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    pub category: Option<Category>,
    /// Price in rupiah
    pub price: Decimal,
    pub stock: i32,
    #[serde(default)]
    pub image_url: String,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Value copy of a menu item taken when it lands in a cart.
///
/// Later price changes on the server do not affect an existing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    pub is_available: bool,
}

impl From<&Menu> for MenuSnapshot {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id.clone(),
            name: menu.name.clone(),
            price: menu.price,
            image_url: menu.image_url.clone(),
            is_available: menu.is_available,
        }
    }
}

impl From<Menu> for MenuSnapshot {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            price: menu.price,
            image_url: menu.image_url,
            is_available: menu.is_available,
        }
    }
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
    pub price: Decimal,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
