//! `/tables` and `/public/tables` endpoints

use shared::models::{Table, TableCreate, TableUpdate};
use shared::response::PaginatedResponse;

use super::PageQuery;
use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn tables(&self, page: PageQuery) -> ClientResult<PaginatedResponse<Table>> {
        self.get_page("/tables", &page).await
    }

    pub async fn table(&self, id: &str) -> ClientResult<Table> {
        self.get(&format!("/tables/{id}")).await
    }

    pub async fn create_table(&self, req: &TableCreate) -> ClientResult<Table> {
        self.post("/tables", req).await
    }

    pub async fn update_table(&self, id: &str, req: &TableUpdate) -> ClientResult<Table> {
        self.put(&format!("/tables/{id}"), req).await
    }

    pub async fn delete_table(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/tables/{id}")).await
    }

    /// PNG of the table's QR code
    pub async fn table_qr_code(&self, id: &str) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("/tables/{id}/qr")).await
    }

    /// Table info for a customer who scanned its QR code
    pub async fn public_table(&self, id: &str) -> ClientResult<Table> {
        self.get(&format!("/public/tables/{id}")).await
    }
}
