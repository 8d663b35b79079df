//! Customer checkout

use shared::models::{Order, OrderCreate};
use tokio::sync::RwLock;

use super::OrderGateway;
use crate::cart::CartStore;
use crate::error::CheckoutError;
use crate::navigation::{NavigationMode, Navigator, routes};

/// Post the cart as an order for its bound table.
///
/// Without a table the customer is sent home; with an empty cart, back to
/// the menu. On success the cart is cleared and the order status page
/// replaces the checkout view. A failed post leaves the cart untouched.
pub async fn checkout(
    orders: &dyn OrderGateway,
    cart: &RwLock<CartStore>,
    navigator: &dyn Navigator,
    notes: Option<String>,
) -> Result<Order, CheckoutError> {
    let req = {
        let cart = cart.read().await;
        let Some(table_id) = cart.table_id() else {
            navigator.navigate(routes::HOME, NavigationMode::Push);
            return Err(CheckoutError::NoTable);
        };
        if cart.is_empty() {
            navigator.navigate(routes::CUSTOMER_MENU, NavigationMode::Push);
            return Err(CheckoutError::EmptyCart);
        }
        OrderCreate {
            table_id: table_id.to_string(),
            notes: notes.filter(|n| !n.is_empty()),
            items: cart.order_items(),
        }
    };

    let order = match orders.create_order(&req).await {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!(table_id = %req.table_id, error = %e, "Order creation failed");
            return Err(e.into());
        }
    };

    cart.write().await.clear();
    tracing::info!(order_id = %order.id, table_id = %req.table_id, total = %order.total, "Order placed");

    navigator.navigate(&routes::order_status(&order.id), NavigationMode::Replace);
    Ok(order)
}
