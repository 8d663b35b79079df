//! Sales Report Model

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sales of a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySalesReport {
    pub date: NaiveDate,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    /// Order count keyed by status
    #[serde(default)]
    pub orders_by_status: HashMap<String, i64>,
}

/// Revenue of one day inside a monthly report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Sales of a calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySalesReport {
    pub year: i32,
    pub month: u32,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    #[serde(default)]
    pub daily_sales: Vec<DailySales>,
}

/// Paid order as listed in the transaction report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub order_id: String,
    pub table_number: i32,
    pub total: Decimal,
    pub status: String,
    pub payment_method: String,
    pub created_at: i64,
}
