//! Resource manipulation helpers shared by the command handlers.
//!
//! - [`update_context`] - Partial updates with a per-field clear policy
//! - [`upsert`] - Insert-or-replace in a named sub-collection
//! - [`path`] - Locating nested child resources

pub mod path;
pub mod update_context;
pub mod upsert;

// Re-export public functions
pub use path::{find_item_at_path, find_named, hub_connection, hub_connections};
pub use update_context::{FieldUpdate, UpdateContext};
pub use upsert::{upsert, upsert_by_name};
