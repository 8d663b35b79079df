//! Data models
//!
//! Wire types of the Pesanin REST API. All IDs are opaque strings,
//! timestamps are unix seconds, money is rupiah as `Decimal`.

pub mod category;
pub mod menu;
pub mod order;
pub mod payment;
pub mod report;
pub mod table;
pub mod user;

// Re-exports
pub use category::*;
pub use menu::*;
pub use order::*;
pub use payment::*;
pub use report::*;
pub use table::*;
pub use user::*;
