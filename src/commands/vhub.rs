//! `network vhub` handlers.

use super::vhub_connection::VhubConnectionCommands;
use super::{create_tags, finish, parse_tags, to_output, ListArgs, ResourceArgs};
use crate::azure::NetworkClient;
use crate::error::Result;
use crate::models::{SubResource, Tags, VirtualHub, VirtualHubProperties};
use crate::processing::{FieldUpdate, UpdateContext};
use clap::{Args, Subcommand};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum VhubCommands {
    /// Create a virtual hub
    Create(CreateVirtualHubArgs),
    /// List virtual hubs
    List(ListArgs),
    /// Get the details of a virtual hub
    Show(ResourceArgs),
    /// Update settings of a virtual hub
    Update(UpdateVirtualHubArgs),
    /// Delete a virtual hub
    Delete(ResourceArgs),
    /// Manage virtual hub VNet connections
    #[command(subcommand)]
    Connection(VhubConnectionCommands),
}

impl VhubCommands {
    pub fn execute<C: NetworkClient>(self, client: &C) -> Result<Option<Value>> {
        match self {
            VhubCommands::Create(args) => to_output(create_virtual_hub(client, args)?),
            VhubCommands::List(args) => {
                to_output(list_virtual_hubs(client, args.resource_group.as_deref())?)
            }
            VhubCommands::Show(args) => to_output(show_virtual_hub(client, &args)?),
            VhubCommands::Update(args) => to_output(update_virtual_hub(client, args)?),
            VhubCommands::Delete(args) => {
                delete_virtual_hub(client, &args)?;
                Ok(None)
            }
            VhubCommands::Connection(cmd) => cmd.execute(client),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateVirtualHubArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual hub
    #[arg(short, long)]
    pub name: String,
    /// CIDR address prefix for the virtual hub
    #[arg(long)]
    pub address_prefix: String,
    /// ID of the virtual WAN
    #[arg(long)]
    pub vwan: String,
    /// Location
    #[arg(short, long)]
    pub location: Option<String>,
    /// Space-separated tags: key[=value]
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// ID of an ExpressRoute gateway
    #[arg(long)]
    pub express_route_gateway: Option<String>,
    /// ID of a point-to-site VPN gateway
    #[arg(long)]
    pub p2s_vpn_gateway: Option<String>,
    /// ID of a site-to-site VPN gateway
    #[arg(long)]
    pub vpn_gateway: Option<String>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateVirtualHubArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual hub
    #[arg(short, long)]
    pub name: String,
    /// CIDR address prefix for the virtual hub
    #[arg(long)]
    pub address_prefix: Option<String>,
    /// ID of the virtual WAN
    #[arg(long)]
    pub vwan: Option<String>,
    /// Space-separated tags: key[=value], "" clears
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// ID of an ExpressRoute gateway, "" detaches
    #[arg(long)]
    pub express_route_gateway: Option<String>,
    /// ID of a point-to-site VPN gateway, "" detaches
    #[arg(long)]
    pub p2s_vpn_gateway: Option<String>,
    /// ID of a site-to-site VPN gateway, "" detaches
    #[arg(long)]
    pub vpn_gateway: Option<String>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

/// Patchable fields of a virtual hub. Tags and gateways can be cleared.
#[derive(Debug, Default)]
pub struct VirtualHubPatch {
    pub tags: FieldUpdate<Tags>,
    pub address_prefix: FieldUpdate<String>,
    pub virtual_wan: FieldUpdate<SubResource>,
    pub express_route_gateway: FieldUpdate<SubResource>,
    pub vpn_gateway: FieldUpdate<SubResource>,
    pub p2s_vpn_gateway: FieldUpdate<SubResource>,
}

impl VirtualHubPatch {
    pub fn from_args(args: &UpdateVirtualHubArgs) -> Result<VirtualHubPatch> {
        let id = |arg: &Option<String>| FieldUpdate::from_arg(arg.clone()).map(SubResource::new);
        Ok(VirtualHubPatch {
            tags: parse_tags(args.tags.clone())?,
            address_prefix: FieldUpdate::from_arg(args.address_prefix.clone()),
            virtual_wan: id(&args.vwan),
            express_route_gateway: id(&args.express_route_gateway),
            vpn_gateway: id(&args.vpn_gateway),
            p2s_vpn_gateway: id(&args.p2s_vpn_gateway),
        })
    }

    /// Apply to `hub`, returning the changed field names.
    pub fn apply(self, hub: &mut VirtualHub) -> Vec<&'static str> {
        let mut c = UpdateContext::new(hub);
        c.update_param("tags", |h| &mut h.tags, self.tags, true)
            .update_param(
                "address_prefix",
                |h| &mut h.properties_mut().address_prefix,
                self.address_prefix,
                false,
            )
            .update_param(
                "virtual_wan",
                |h| &mut h.properties_mut().virtual_wan,
                self.virtual_wan,
                false,
            )
            .update_param(
                "express_route_gateway",
                |h| &mut h.properties_mut().express_route_gateway,
                self.express_route_gateway,
                true,
            )
            .update_param(
                "vpn_gateway",
                |h| &mut h.properties_mut().vpn_gateway,
                self.vpn_gateway,
                true,
            )
            .update_param(
                "p2s_vpn_gateway",
                |h| &mut h.properties_mut().p2s_vpn_gateway,
                self.p2s_vpn_gateway,
                true,
            );
        c.changed().to_vec()
    }
}

/// Gateways are only referenced when an id was given.
pub fn create_virtual_hub<C: NetworkClient>(
    client: &C,
    args: CreateVirtualHubArgs,
) -> Result<VirtualHub> {
    let hub = VirtualHub {
        location: args.location,
        tags: create_tags(args.tags)?,
        properties: Some(VirtualHubProperties {
            address_prefix: Some(args.address_prefix),
            virtual_wan: Some(SubResource::new(args.vwan)),
            express_route_gateway: SubResource::from_id(args.express_route_gateway.as_deref()),
            p2s_vpn_gateway: SubResource::from_id(args.p2s_vpn_gateway.as_deref()),
            vpn_gateway: SubResource::from_id(args.vpn_gateway.as_deref()),
            ..Default::default()
        }),
        ..Default::default()
    };
    log::info!("create virtual hub {}/{}", args.resource_group, args.name);
    let poller = client
        .virtual_hubs()
        .create_or_update(&args.resource_group, &args.name, &hub)?;
    finish(poller, args.no_wait)
}

pub fn list_virtual_hubs<C: NetworkClient>(
    client: &C,
    resource_group_name: Option<&str>,
) -> Result<Vec<VirtualHub>> {
    match resource_group_name {
        Some(rg) => client.virtual_hubs().list_by_resource_group(rg),
        None => client.virtual_hubs().list(),
    }
}

pub fn show_virtual_hub<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<VirtualHub> {
    client.virtual_hubs().get(&args.resource_group, &args.name)
}

pub fn update_virtual_hub<C: NetworkClient>(
    client: &C,
    args: UpdateVirtualHubArgs,
) -> Result<VirtualHub> {
    let patch = VirtualHubPatch::from_args(&args)?;
    let mut hub = client.virtual_hubs().get(&args.resource_group, &args.name)?;
    let changed = patch.apply(&mut hub);
    log::info!(
        "update virtual hub {}/{} fields={changed:?}",
        args.resource_group,
        args.name
    );
    let poller = client
        .virtual_hubs()
        .create_or_update(&args.resource_group, &args.name, &hub)?;
    finish(poller, args.no_wait)
}

pub fn delete_virtual_hub<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<()> {
    client
        .virtual_hubs()
        .delete(&args.resource_group, &args.name)
}
