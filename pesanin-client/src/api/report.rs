//! `/reports` endpoints

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{DailySalesReport, MonthlySalesReport, Transaction};

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Serialize)]
struct DailyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct MonthlyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<u32>,
}

/// Transaction report date range; open ends are omitted
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ApiClient {
    /// Sales of `date`, or of today when `None`
    pub async fn daily_sales(&self, date: Option<NaiveDate>) -> ClientResult<DailySalesReport> {
        self.get_query("/reports/sales/daily", &DailyQuery { date })
            .await
    }

    pub async fn monthly_sales(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> ClientResult<MonthlySalesReport> {
        self.get_query("/reports/sales/monthly", &MonthlyQuery { year, month })
            .await
    }

    pub async fn transactions(&self, query: &TransactionQuery) -> ClientResult<Vec<Transaction>> {
        self.get_query("/reports/transactions", query).await
    }
}
