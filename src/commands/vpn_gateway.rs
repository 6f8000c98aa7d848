//! `network vpn-gateway` and `network p2s-vpn-gateway` handlers.

use super::{create_tags, finish, to_output, ListArgs, ResourceArgs};
use crate::azure::NetworkClient;
use crate::error::Result;
use crate::models::{GatewayProperties, P2sVpnGateway, SubResource, VpnGateway};
use clap::{Args, Subcommand};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum VpnGatewayCommands {
    /// Create a site-to-site VPN gateway
    Create(CreateGatewayArgs),
    /// List site-to-site VPN gateways
    List(ListArgs),
    /// Get the details of a site-to-site VPN gateway
    Show(ResourceArgs),
    /// Delete a site-to-site VPN gateway
    Delete(ResourceArgs),
}

#[derive(Subcommand, Debug)]
pub enum P2sVpnGatewayCommands {
    /// Create a point-to-site VPN gateway
    Create(CreateGatewayArgs),
    /// List point-to-site VPN gateways
    List(ListArgs),
    /// Get the details of a point-to-site VPN gateway
    Show(ResourceArgs),
    /// Delete a point-to-site VPN gateway
    Delete(ResourceArgs),
}

impl VpnGatewayCommands {
    pub fn execute<C: NetworkClient>(self, client: &C) -> Result<Option<Value>> {
        match self {
            VpnGatewayCommands::Create(args) => to_output(create_vpn_gateway(client, args)?),
            VpnGatewayCommands::List(args) => {
                to_output(list_vpn_gateways(client, args.resource_group.as_deref())?)
            }
            VpnGatewayCommands::Show(args) => to_output(show_vpn_gateway(client, &args)?),
            VpnGatewayCommands::Delete(args) => {
                delete_vpn_gateway(client, &args)?;
                Ok(None)
            }
        }
    }
}

impl P2sVpnGatewayCommands {
    pub fn execute<C: NetworkClient>(self, client: &C) -> Result<Option<Value>> {
        match self {
            P2sVpnGatewayCommands::Create(args) => {
                to_output(create_p2s_vpn_gateway(client, args)?)
            }
            P2sVpnGatewayCommands::List(args) => {
                to_output(list_p2s_vpn_gateways(client, args.resource_group.as_deref())?)
            }
            P2sVpnGatewayCommands::Show(args) => to_output(show_p2s_vpn_gateway(client, &args)?),
            P2sVpnGatewayCommands::Delete(args) => {
                delete_p2s_vpn_gateway(client, &args)?;
                Ok(None)
            }
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateGatewayArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the gateway
    #[arg(short, long)]
    pub name: String,
    /// Location
    #[arg(short, long)]
    pub location: Option<String>,
    /// Space-separated tags: key[=value]
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// ID of the virtual hub the gateway belongs to
    #[arg(long)]
    pub vhub: Option<String>,
    /// Scale unit of the gateway
    #[arg(long)]
    pub scale_unit: Option<i32>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

impl CreateGatewayArgs {
    fn properties(&self) -> Option<GatewayProperties> {
        GatewayProperties {
            virtual_hub: SubResource::from_id(self.vhub.as_deref()),
            vpn_gateway_scale_unit: self.scale_unit,
            ..Default::default()
        }
        .non_empty()
    }
}

pub fn create_vpn_gateway<C: NetworkClient>(
    client: &C,
    args: CreateGatewayArgs,
) -> Result<VpnGateway> {
    let gateway = VpnGateway {
        properties: args.properties(),
        location: args.location.clone(),
        tags: create_tags(args.tags.clone())?,
        ..Default::default()
    };
    log::info!("create VPN gateway {}/{}", args.resource_group, args.name);
    let poller = client
        .vpn_gateways()
        .create_or_update(&args.resource_group, &args.name, &gateway)?;
    finish(poller, args.no_wait)
}

pub fn list_vpn_gateways<C: NetworkClient>(
    client: &C,
    resource_group_name: Option<&str>,
) -> Result<Vec<VpnGateway>> {
    match resource_group_name {
        Some(rg) => client.vpn_gateways().list_by_resource_group(rg),
        None => client.vpn_gateways().list(),
    }
}

pub fn show_vpn_gateway<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<VpnGateway> {
    client
        .vpn_gateways()
        .get(&args.resource_group, &args.name)
}

pub fn delete_vpn_gateway<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<()> {
    client
        .vpn_gateways()
        .delete(&args.resource_group, &args.name)
}

pub fn create_p2s_vpn_gateway<C: NetworkClient>(
    client: &C,
    args: CreateGatewayArgs,
) -> Result<P2sVpnGateway> {
    let gateway = P2sVpnGateway {
        properties: args.properties(),
        location: args.location.clone(),
        tags: create_tags(args.tags.clone())?,
        ..Default::default()
    };
    log::info!(
        "create point-to-site VPN gateway {}/{}",
        args.resource_group,
        args.name
    );
    let poller = client
        .p2s_vpn_gateways()
        .create_or_update(&args.resource_group, &args.name, &gateway)?;
    finish(poller, args.no_wait)
}

pub fn list_p2s_vpn_gateways<C: NetworkClient>(
    client: &C,
    resource_group_name: Option<&str>,
) -> Result<Vec<P2sVpnGateway>> {
    match resource_group_name {
        Some(rg) => client.p2s_vpn_gateways().list_by_resource_group(rg),
        None => client.p2s_vpn_gateways().list(),
    }
}

pub fn show_p2s_vpn_gateway<C: NetworkClient>(
    client: &C,
    args: &ResourceArgs,
) -> Result<P2sVpnGateway> {
    client
        .p2s_vpn_gateways()
        .get(&args.resource_group, &args.name)
}

pub fn delete_p2s_vpn_gateway<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<()> {
    client
        .p2s_vpn_gateways()
        .delete(&args.resource_group, &args.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::{MockNetworkClient, Poller};

    #[test]
    fn test_create_vpn_gateway_location_and_tags_only() {
        let mut client = MockNetworkClient::new();
        client
            .vpn_gateways
            .expect_create_or_update()
            .withf(|rg, name, gw| {
                rg == "rg1"
                    && name == "gw1"
                    && serde_json::to_value(gw).expect("serialize")
                        == serde_json::json!({"location": "westus", "tags": {"env": "dev"}})
            })
            .times(1)
            .returning(|_, _, gw| Ok(Poller::done(gw.clone())));

        create_vpn_gateway(
            &client,
            CreateGatewayArgs {
                resource_group: "rg1".to_string(),
                name: "gw1".to_string(),
                location: Some("westus".to_string()),
                tags: Some(vec!["env=dev".to_string()]),
                ..Default::default()
            },
        )
        .expect("create");
    }

    #[test]
    fn test_create_p2s_gateway_with_hub() {
        let mut client = MockNetworkClient::new();
        client
            .p2s_vpn_gateways
            .expect_create_or_update()
            .returning(|_, _, gw| Ok(Poller::done(gw.clone())));

        let gw = create_p2s_vpn_gateway(
            &client,
            CreateGatewayArgs {
                resource_group: "rg1".to_string(),
                name: "p2s1".to_string(),
                vhub: Some("hub-id".to_string()),
                scale_unit: Some(1),
                ..Default::default()
            },
        )
        .expect("create");
        let props = gw.properties.expect("properties");
        assert_eq!(props.virtual_hub, Some(SubResource::new("hub-id")));
        assert_eq!(props.vpn_gateway_scale_unit, Some(1));
    }

    #[test]
    fn test_list_gateways_unscoped() {
        let mut client = MockNetworkClient::new();
        client
            .vpn_gateways
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![VpnGateway::default()]));
        client
            .p2s_vpn_gateways
            .expect_list_by_resource_group()
            .times(1)
            .returning(|_| Ok(vec![]));

        assert_eq!(list_vpn_gateways(&client, None).expect("list").len(), 1);
        assert!(list_p2s_vpn_gateways(&client, Some("rg1"))
            .expect("list")
            .is_empty());
    }
}
