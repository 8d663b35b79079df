//! REST service wrappers
//!
//! Thin `impl ApiClient` blocks, one file per API area. Paths are relative
//! to the configured base URL.

mod auth;
mod category;
mod menu;
mod order;
mod payment;
mod report;
mod table;

pub use order::OrderListQuery;
pub use report::TransactionQuery;

use serde::Serialize;
use shared::response::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// `page` / `page_size` query pair
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
