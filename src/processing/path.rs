//! Locating nested child resources.

use crate::error::{Result, VwanError};
use crate::models::{HubVirtualNetworkConnection, Named, VirtualHub};
use serde_json::Value;

/// Find an item by name, ignoring case.
pub fn find_named<'a, T: Named>(items: &'a [T], name: &str) -> Result<&'a T> {
    items
        .iter()
        .find(|x| x.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
        .ok_or_else(|| VwanError::NotFound(format!("Property '{name}' does not exist")))
}

/// The hub's VNet connections.
pub fn hub_connections(hub: &VirtualHub) -> Result<&[HubVirtualNetworkConnection]> {
    hub.properties
        .as_ref()
        .and_then(|p| p.virtual_network_connections.as_deref())
        .ok_or_else(|| {
            VwanError::NotFound("unable to find 'virtualNetworkConnections'...".to_string())
        })
}

/// The hub's VNet connection called `name`.
pub fn hub_connection<'a>(
    hub: &'a VirtualHub,
    name: &str,
) -> Result<&'a HubVirtualNetworkConnection> {
    find_named(hub_connections(hub)?, name)
}

/// Walk `path` through the JSON form of a resource.
///
/// The path alternates property and item names, e.g.
/// `properties.virtualNetworkConnections.conn1`: tokens at even positions
/// are object properties, tokens at odd positions pick the array element
/// whose `name` equals the token.
pub fn find_item_at_path<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut curr = root;
    for (i, comp) in path.split('.').enumerate() {
        let next = if i % 2 == 1 {
            curr.as_array().and_then(|items| {
                items
                    .iter()
                    .find(|x| x.get("name").and_then(Value::as_str) == Some(comp))
            })
        } else {
            curr.get(comp)
        };
        curr = match next {
            Some(Value::Null) | None => {
                return Err(VwanError::NotFound(format!("unable to find '{comp}'...")))
            }
            Some(value) => value,
        };
    }
    Ok(curr)
}
