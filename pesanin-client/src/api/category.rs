//! `/categories` endpoints

use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/categories").await
    }

    pub async fn category(&self, id: &str) -> ClientResult<Category> {
        self.get(&format!("/categories/{id}")).await
    }

    pub async fn create_category(&self, req: &CategoryCreate) -> ClientResult<Category> {
        self.post("/categories", req).await
    }

    pub async fn update_category(&self, id: &str, req: &CategoryUpdate) -> ClientResult<Category> {
        self.put(&format!("/categories/{id}"), req).await
    }

    pub async fn delete_category(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/categories/{id}")).await
    }
}
