//! Pesanin Client - client core for the Pesanin restaurant ordering API
//!
//! Persistent cart and auth stores, the authenticated HTTP client with its
//! 401 interceptor, customer flows (scan, checkout, status polling) and the
//! staff route guard.

pub mod api;
pub mod auth;
pub mod cart;
pub mod config;
pub mod context;
pub mod error;
pub mod flows;
pub mod format;
pub mod guard;
pub mod http;
pub mod logging;
pub mod navigation;
pub mod poll;
pub mod storage;

pub use auth::{AuthSession, AuthStore, Hydration};
pub use cart::{CartLine, CartSession, CartStore};
pub use config::ClientConfig;
pub use context::AppContext;
pub use error::{CheckoutError, ClientError, ClientResult, StorageError};
pub use guard::{GuardDecision, RouteGuard};
pub use http::ApiClient;
pub use navigation::{HistoryNavigator, NavigationMode, Navigator, routes};
pub use poll::{PollSnapshot, Poller};
pub use storage::{FileStorage, MemoryStorage, SharedStorage, Storage};

// Re-export shared types for convenience
pub use shared::models::{Menu, MenuSnapshot, Order, OrderStatus, Table, User, UserRole};
pub use shared::response::{ApiResponse, PaginatedResponse};
