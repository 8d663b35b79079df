//! Navigation surfaces
//!
//! Flows never render anything themselves; they ask a [`Navigator`] to move
//! to a path. The terminal front-end and tests use [`HistoryNavigator`].

use std::sync::Mutex;

/// Well-known paths
pub mod routes {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const UNAUTHORIZED: &str = "/unauthorized";
    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
    pub const CUSTOMER_MENU: &str = "/customer/menu";
    pub const CUSTOMER_CART: &str = "/customer/cart";
    pub const CUSTOMER_CHECKOUT: &str = "/customer/checkout";
    pub const CUSTOMER_ORDERS: &str = "/customer/orders";

    pub fn scan(table_id: &str) -> String {
        format!("/customer/scan/{table_id}")
    }

    pub fn order_status(order_id: &str) -> String {
        format!("/customer/order-status/{order_id}")
    }

    /// Areas where an expired session forces a bounce to login
    pub fn is_role_gated(path: &str) -> bool {
        path.starts_with("/admin") || path.starts_with("/customer")
    }
}

/// How a navigation replaces the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Push a history entry
    Push,
    /// Replace the current history entry
    Replace,
    /// Full reload of the target, dropping all in-flight view state
    Full,
}

/// Router abstraction
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str, mode: NavigationMode);
}

/// In-memory navigator that records every navigation
#[derive(Debug)]
pub struct HistoryNavigator {
    current: Mutex<String>,
    history: Mutex<Vec<(String, NavigationMode)>>,
}

impl HistoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial.into()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Every navigation so far, oldest first
    pub fn history(&self) -> Vec<(String, NavigationMode)> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Move without recording, as if the user followed a link
    pub fn set_current(&self, path: impl Into<String>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = path.into();
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(routes::HOME)
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn navigate(&self, path: &str, mode: NavigationMode) {
        tracing::debug!(path, ?mode, "Navigate");
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = path.to_string();
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((path.to_string(), mode));
    }
}
