//! Typed API surface
//!
//! One module per backend resource; each adds an `impl` block on
//! [`crate::DsmsClient`] with one method per REST operation.

pub mod activity;
pub mod auth;
pub mod categories;
pub mod items;
pub mod labels;
pub mod machinery;
pub mod requests;
pub mod roles;
pub mod stock;
pub mod users;

pub use activity::ActivityLogQuery;
pub use items::ItemQuery;
pub use machinery::MachineryQuery;
pub use requests::RequestQuery;
pub use stock::StockMovementQuery;
