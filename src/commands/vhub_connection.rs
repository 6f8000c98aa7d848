//! `network vhub connection` handlers.
//!
//! Connections live inside the hub resource: every change reads the hub,
//! edits its `virtualNetworkConnections` and writes the whole hub back.

use super::{finish, to_output};
use crate::azure::NetworkClient;
use crate::error::Result;
use crate::models::{
    HubVirtualNetworkConnection, HubVirtualNetworkConnectionProperties, SubResource, VirtualHub,
};
use crate::processing::{find_named, hub_connection, upsert_by_name};
use clap::{Args, Subcommand};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum VhubConnectionCommands {
    /// Create a virtual hub VNet connection
    Create(CreateHubVnetConnectionArgs),
    /// List virtual hub VNet connections
    List(HubArgs),
    /// Get the details of a virtual hub VNet connection
    Show(ConnectionArgs),
    /// Delete a virtual hub VNet connection
    Delete(DeleteConnectionArgs),
}

impl VhubConnectionCommands {
    pub fn execute<C: NetworkClient>(self, client: &C) -> Result<Option<Value>> {
        match self {
            VhubConnectionCommands::Create(args) => {
                to_output(create_hub_vnet_connection(client, args)?)
            }
            VhubConnectionCommands::List(args) => {
                to_output(list_hub_vnet_connections(client, &args)?)
            }
            VhubConnectionCommands::Show(args) => {
                to_output(show_hub_vnet_connection(client, &args)?)
            }
            VhubConnectionCommands::Delete(args) => {
                delete_hub_vnet_connection(client, &args)?;
                Ok(None)
            }
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HubArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual hub
    #[arg(long)]
    pub vhub_name: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionArgs {
    #[command(flatten)]
    pub hub: HubArgs,
    /// Name of the connection
    #[arg(short, long)]
    pub name: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DeleteConnectionArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateHubVnetConnectionArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual hub
    #[arg(long)]
    pub vhub_name: String,
    /// Name of the connection
    #[arg(short, long)]
    pub name: String,
    /// ID of the remote virtual network
    #[arg(long)]
    pub remote_vnet: String,
    /// Allow the hub to use the remote VNet for transit
    #[arg(long)]
    pub remote_vnet_transit: Option<bool>,
    /// Allow the remote VNet to use the hub's VNet gateways
    #[arg(long)]
    pub use_hub_vnet_gateways: Option<bool>,
    /// Enable internet security
    #[arg(long)]
    pub internet_security: Option<bool>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

/// Upsert the connection into its hub, write the hub, return the stored connection.
pub fn create_hub_vnet_connection<C: NetworkClient>(
    client: &C,
    args: CreateHubVnetConnectionArgs,
) -> Result<HubVirtualNetworkConnection> {
    let hubs = client.virtual_hubs();
    let mut hub = hubs.get(&args.resource_group, &args.vhub_name)?;

    let connection = HubVirtualNetworkConnection {
        name: Some(args.name.clone()),
        properties: Some(HubVirtualNetworkConnectionProperties {
            remote_virtual_network: Some(SubResource::new(args.remote_vnet)),
            allow_hub_to_remote_vnet_transit: args.remote_vnet_transit,
            allow_remote_vnet_to_use_hub_vnet_gateways: args.use_hub_vnet_gateways,
            enable_internet_security: args.internet_security,
            ..Default::default()
        }),
        ..Default::default()
    };
    upsert_by_name(
        &mut hub.properties_mut().virtual_network_connections,
        connection,
        true,
    )?;

    log::info!(
        "create connection {} on virtual hub {}/{}",
        args.name,
        args.resource_group,
        args.vhub_name
    );
    let poller = hubs.create_or_update(&args.resource_group, &args.vhub_name, &hub)?;
    let hub = finish(poller, args.no_wait)?;
    hub_connection(&hub, &args.name).cloned()
}

pub fn list_hub_vnet_connections<C: NetworkClient>(
    client: &C,
    args: &HubArgs,
) -> Result<Vec<HubVirtualNetworkConnection>> {
    let hub = client
        .virtual_hubs()
        .get(&args.resource_group, &args.vhub_name)?;
    Ok(hub
        .properties
        .and_then(|p| p.virtual_network_connections)
        .unwrap_or_default())
}

pub fn show_hub_vnet_connection<C: NetworkClient>(
    client: &C,
    args: &ConnectionArgs,
) -> Result<HubVirtualNetworkConnection> {
    let hub = client
        .virtual_hubs()
        .get(&args.hub.resource_group, &args.hub.vhub_name)?;
    hub_connection(&hub, &args.name).cloned()
}

/// Remove the connection from its hub; fails if the hub has no such connection.
pub fn delete_hub_vnet_connection<C: NetworkClient>(
    client: &C,
    args: &DeleteConnectionArgs,
) -> Result<VirtualHub> {
    let ConnectionArgs { hub: hub_args, name } = &args.connection;
    let hubs = client.virtual_hubs();
    let mut hub = hubs.get(&hub_args.resource_group, &hub_args.vhub_name)?;

    let connections = hub
        .properties_mut()
        .virtual_network_connections
        .get_or_insert_with(Vec::new);
    let found = find_named(connections, name)?.name.clone();
    connections.retain(|c| c.name != found);

    log::info!(
        "delete connection {name} from virtual hub {}/{}",
        hub_args.resource_group,
        hub_args.vhub_name
    );
    let poller = hubs.create_or_update(&hub_args.resource_group, &hub_args.vhub_name, &hub)?;
    finish(poller, args.no_wait)
}
