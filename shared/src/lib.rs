//! Shared types for Pesanin
//!
//! Wire types of the Pesanin REST API: models, request payloads and
//! response envelopes.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::*;
pub use response::{ApiResponse, PaginatedResponse, Pagination};
