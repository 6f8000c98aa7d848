//! Command line surface and the handlers behind it.
//!
//! - [`vwan`] - `network vwan`
//! - [`vhub`] - `network vhub`
//! - [`vhub_connection`] - `network vhub connection`
//! - [`vpn_site`] - `network vpn-site`
//! - [`vpn_gateway`] - `network vpn-gateway` and `network p2s-vpn-gateway`

pub mod vhub;
pub mod vhub_connection;
pub mod vpn_gateway;
pub mod vpn_site;
pub mod vwan;

use crate::azure::{NetworkClient, Poller};
use crate::error::{Result, VwanError};
use crate::models::{Provisioned, Tags};
use crate::output::OutputFormat;
use crate::processing::FieldUpdate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

/// Manage Azure Virtual WAN resources.
#[derive(Parser, Debug)]
#[command(name = "azure-vwan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subscription id, defaults to AZURE_SUBSCRIPTION_ID or the az cli default
    #[arg(long, global = true)]
    pub subscription: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Only print the item at this path, e.g. properties.virtualNetworkConnections.conn1
    #[arg(long, global = true)]
    pub select: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage Azure network resources
    #[command(subcommand)]
    Network(NetworkCommands),
}

#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// Manage virtual WANs
    #[command(subcommand)]
    Vwan(vwan::VwanCommands),

    /// Manage virtual hubs
    #[command(subcommand)]
    Vhub(vhub::VhubCommands),

    /// Manage VPN site configurations
    #[command(subcommand)]
    VpnSite(vpn_site::VpnSiteCommands),

    /// Manage site-to-site VPN gateways
    #[command(subcommand)]
    VpnGateway(vpn_gateway::VpnGatewayCommands),

    /// Manage point-to-site VPN gateways
    #[command(subcommand, name = "p2s-vpn-gateway")]
    P2sVpnGateway(vpn_gateway::P2sVpnGatewayCommands),
}

/// Resource group and name of an existing resource.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResourceArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the resource
    #[arg(short, long)]
    pub name: String,
}

/// Optional resource group scope of a list command.
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct ListArgs {
    /// Name of resource group, lists the whole subscription when omitted
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,
}

/// Run a parsed command and return what should be printed.
pub fn execute<C: NetworkClient>(command: Commands, client: &C) -> Result<Option<Value>> {
    match command {
        Commands::Network(NetworkCommands::Vwan(cmd)) => cmd.execute(client),
        Commands::Network(NetworkCommands::Vhub(cmd)) => cmd.execute(client),
        Commands::Network(NetworkCommands::VpnSite(cmd)) => cmd.execute(client),
        Commands::Network(NetworkCommands::VpnGateway(cmd)) => cmd.execute(client),
        Commands::Network(NetworkCommands::P2sVpnGateway(cmd)) => cmd.execute(client),
    }
}

pub(crate) fn to_output<T: Serialize>(value: T) -> Result<Option<Value>> {
    Ok(Some(serde_json::to_value(value)?))
}

/// First response with `no_wait`, final state otherwise.
pub(crate) fn finish<T: Provisioned>(poller: Poller<T>, no_wait: bool) -> Result<T> {
    if no_wait {
        Ok(poller.initial())
    } else {
        poller.result()
    }
}

/// Space separated `key[=value]` tags; a single empty value clears them.
pub fn parse_tags(values: Option<Vec<String>>) -> Result<FieldUpdate<Tags>> {
    let values = match values {
        None => return Ok(FieldUpdate::Keep),
        Some(values) => values,
    };
    if values.iter().all(|v| v.is_empty()) {
        return Ok(FieldUpdate::Clear);
    }

    let mut tags = Tags::new();
    for value in values.iter().filter(|v| !v.is_empty()) {
        let (key, val) = value.split_once('=').unwrap_or((value.as_str(), ""));
        if key.is_empty() {
            return Err(VwanError::Configuration(format!(
                "Invalid tag '{value}', expected key[=value]"
            )));
        }
        tags.insert(key.to_string(), val.to_string());
    }
    Ok(FieldUpdate::Set(tags))
}

/// Tags for a new resource: nothing unless real tags were given.
pub(crate) fn create_tags(values: Option<Vec<String>>) -> Result<Option<Tags>> {
    Ok(match parse_tags(values)? {
        FieldUpdate::Set(tags) => Some(tags),
        FieldUpdate::Keep | FieldUpdate::Clear => None,
    })
}
