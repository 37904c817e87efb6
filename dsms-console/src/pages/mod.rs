//! Per-resource page controllers
//!
//! Each page owns its [`crate::page::PageState`], filters and form
//! draft, and talks to the backend through the client handed in by the
//! caller. Every mutation reloads the canonical collection; nothing is
//! patched locally.

pub mod activity;
pub mod categories;
pub mod items;
pub mod labels;
pub mod machinery;
pub mod requests;
pub mod roles;
pub mod stock;
pub mod users;

pub use activity::ActivityPage;
pub use categories::CategoriesPage;
pub use items::ItemsPage;
pub use labels::LabelsPage;
pub use machinery::{MachineryPage, MachineryTypesPage};
pub use requests::{ApprovalQueue, FulfillmentQueue, RequestsPage};
pub use roles::RolesPage;
pub use stock::StockPage;
pub use users::UsersPage;
