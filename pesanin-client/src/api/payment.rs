//! `/payments` endpoints

use shared::models::Payment;

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn payment_by_order(&self, order_id: &str) -> ClientResult<Payment> {
        self.get(&format!("/payments/order/{order_id}")).await
    }
}
