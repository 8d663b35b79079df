//! `/orders` and `/public/orders` endpoints

use serde::Serialize;
use shared::models::{Order, OrderCreate, OrderStatus, OrderStatusUpdate, Payment};
use shared::response::PaginatedResponse;

use super::PageQuery;
use crate::error::ClientResult;
use crate::http::ApiClient;

/// Staff order list filter
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct OrderListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl ApiClient {
    pub async fn orders(&self, query: &OrderListQuery) -> ClientResult<PaginatedResponse<Order>> {
        self.get_page("/orders", query).await
    }

    pub async fn order(&self, id: &str) -> ClientResult<Order> {
        self.get(&format!("/orders/{id}")).await
    }

    pub async fn orders_by_table(&self, table_id: &str) -> ClientResult<Vec<Order>> {
        self.get(&format!("/orders/table/{table_id}")).await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<()> {
        self.patch_unit(&format!("/orders/{id}/status"), &OrderStatusUpdate { status })
            .await
    }

    /// Customer checkout: create an order for a table
    pub async fn create_order(&self, req: &OrderCreate) -> ClientResult<Order> {
        self.post("/public/orders", req).await
    }

    /// Customer view of one order
    pub async fn order_status(&self, id: &str) -> ClientResult<Order> {
        self.get(&format!("/public/orders/{id}")).await
    }

    /// Start payment for an order
    pub async fn checkout_order(&self, id: &str) -> ClientResult<Payment> {
        self.post_empty(&format!("/public/orders/{id}/checkout"))
            .await
    }
}
