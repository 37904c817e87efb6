//! DSMS Console - application core of the administrative dashboard
//!
//! Everything the dashboard does apart from rendering: the session
//! store, the privilege table and route guard, the category tree
//! model, label grouping, the privilege-gated CRUD page controllers
//! and the bulk-import preview/commit flows. State lives in explicit
//! page-local controllers; the only cross-page state is the session,
//! owned by [`shell::ConsoleShell`] and passed by reference.

pub mod category_tree;
pub mod config;
pub mod guard;
pub mod import;
pub mod labels;
pub mod page;
pub mod pages;
pub mod privileges;
pub mod session;
pub mod shell;

pub use config::ConsoleConfig;
pub use guard::{GuardState, Require};
pub use privileges::{PrivilegeFlag, has_any_privilege, has_privilege};
pub use session::{Session, SessionStore};
pub use shell::ConsoleShell;
