//! Customer flows
//!
//! Each flow reads and mutates the stores, talks to the server through a
//! narrow gateway trait and finishes with a navigation.

mod checkout;
mod scan;

pub use checkout::checkout;
pub use scan::{ScanFlow, ScanOutcome};

use async_trait::async_trait;
use shared::models::{Order, OrderCreate, Table};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Public table lookup used by the scan flow
#[async_trait]
pub trait TableDirectory: Send + Sync {
    async fn public_table(&self, table_id: &str) -> ClientResult<Table>;
}

/// Customer order endpoints used by checkout and polling
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, req: &OrderCreate) -> ClientResult<Order>;
    async fn order_status(&self, order_id: &str) -> ClientResult<Order>;
    async fn orders_by_table(&self, table_id: &str) -> ClientResult<Vec<Order>>;
}

#[async_trait]
impl TableDirectory for ApiClient {
    async fn public_table(&self, table_id: &str) -> ClientResult<Table> {
        ApiClient::public_table(self, table_id).await
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    async fn create_order(&self, req: &OrderCreate) -> ClientResult<Order> {
        ApiClient::create_order(self, req).await
    }

    async fn order_status(&self, order_id: &str) -> ClientResult<Order> {
        ApiClient::order_status(self, order_id).await
    }

    async fn orders_by_table(&self, table_id: &str) -> ClientResult<Vec<Order>> {
        ApiClient::orders_by_table(self, table_id).await
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use crate::error::ClientError;
    use rust_decimal::Decimal;
    use shared::models::{OrderStatus, TableStatus};
    use std::sync::Mutex;

    pub(crate) fn table(id: &str, number: i32) -> Table {
        Table {
            id: id.to_string(),
            table_number: number,
            barcode_url: String::new(),
            status: TableStatus::Available,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Tables known by id; anything else is not found
    pub(crate) struct FakeTables(pub Vec<Table>);

    #[async_trait]
    impl TableDirectory for FakeTables {
        async fn public_table(&self, table_id: &str) -> ClientResult<Table> {
            self.0
                .iter()
                .find(|t| t.id == table_id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound("Meja tidak ditemukan".into()))
        }
    }

    /// Records created orders; fails every call when `fail` is set
    #[derive(Default)]
    pub(crate) struct FakeOrders {
        pub fail: bool,
        pub created: Mutex<Vec<OrderCreate>>,
    }

    impl FakeOrders {
        pub(crate) fn order_for(req: &OrderCreate, id: &str) -> Order {
            Order {
                id: id.to_string(),
                table_id: req.table_id.clone(),
                table: None,
                user_id: None,
                user: None,
                total: Decimal::ZERO,
                status: OrderStatus::Pending,
                notes: req.notes.clone().unwrap_or_default(),
                order_items: Vec::new(),
                created_at: 0,
                updated_at: 0,
            }
        }
    }

    #[async_trait]
    impl OrderGateway for FakeOrders {
        async fn create_order(&self, req: &OrderCreate) -> ClientResult<Order> {
            if self.fail {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Gagal membuat pesanan".into(),
                });
            }
            let mut created = self.created.lock().unwrap();
            created.push(req.clone());
            Ok(Self::order_for(req, &format!("o{}", created.len())))
        }

        async fn order_status(&self, order_id: &str) -> ClientResult<Order> {
            Err(ClientError::NotFound(order_id.to_string()))
        }

        async fn orders_by_table(&self, _table_id: &str) -> ClientResult<Vec<Order>> {
            Ok(Vec::new())
        }
    }
}
