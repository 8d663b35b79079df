//! Table-scan binding
//!
//! `Scanning -> Bound -> redirect to menu`, or `Scanning -> NotFound ->
//! redirect home`. On success the cart is cleared before the new table is
//! bound, so no line from a previous table survives a scan.

use std::time::Duration;

use shared::models::Table;
use tokio::sync::RwLock;

use super::TableDirectory;
use crate::cart::CartStore;
use crate::error::ClientError;
use crate::navigation::{NavigationMode, Navigator, routes};

/// Result of a scan
#[derive(Debug)]
pub enum ScanOutcome {
    Bound(Table),
    NotFound(ClientError),
}

pub struct ScanFlow<'a> {
    tables: &'a dyn TableDirectory,
    cart: &'a RwLock<CartStore>,
    navigator: &'a dyn Navigator,
    redirect_delay: Duration,
}

impl<'a> ScanFlow<'a> {
    pub fn new(
        tables: &'a dyn TableDirectory,
        cart: &'a RwLock<CartStore>,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            tables,
            cart,
            navigator,
            redirect_delay: Duration::from_millis(1500),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub async fn run(&self, table_id: &str) -> ScanOutcome {
        tracing::debug!(table_id, "Verifying scanned table");

        let table = match self.tables.public_table(table_id).await {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(table_id, error = %e, "Scanned table not found");
                self.navigator.navigate(routes::HOME, NavigationMode::Replace);
                return ScanOutcome::NotFound(e);
            }
        };

        {
            let mut cart = self.cart.write().await;
            cart.clear();
            cart.bind_table(table.id.clone());
        }
        tracing::info!(table_id = %table.id, table_number = table.table_number, "Table bound");

        tokio::time::sleep(self.redirect_delay).await;
        self.navigator
            .navigate(routes::CUSTOMER_MENU, NavigationMode::Replace);

        ScanOutcome::Bound(table)
    }
}
