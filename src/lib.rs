//! CRUD commands for Azure Virtual WAN resources.
//!
//! Handlers in [`commands`] build request payloads from flat arguments, hand
//! them to an injected [`azure::NetworkClient`] and optionally patch the
//! returned model with the helpers in [`processing`] before sending it back.

pub mod azure;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Result, VwanError};

use serde_json::Value;

/// Narrow a command result to the item at `path`, if one was asked for.
pub fn select(value: Value, path: Option<&str>) -> Result<Value> {
    match path {
        None => Ok(value),
        Some(path) => processing::find_item_at_path(&value, path).cloned(),
    }
}
