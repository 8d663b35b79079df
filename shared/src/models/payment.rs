//! Payment Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment record created by the server at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub payment_method: String,
    pub status: String,
    pub amount: Decimal,
    /// Payment gateway session token
    #[serde(default)]
    pub snap_token: String,
    #[serde(default)]
    pub snap_redirect_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}
