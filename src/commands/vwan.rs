//! `network vwan` handlers.

use super::{create_tags, finish, parse_tags, to_output, ListArgs, ResourceArgs};
use crate::azure::NetworkClient;
use crate::error::Result;
use crate::models::{Office365Category, Tags, VirtualWan, VirtualWanProperties};
use crate::processing::{FieldUpdate, UpdateContext};
use clap::{Args, Subcommand};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum VwanCommands {
    /// Create a virtual WAN
    Create(CreateVirtualWanArgs),
    /// List virtual WANs
    List(ListArgs),
    /// Get the details of a virtual WAN
    Show(ResourceArgs),
    /// Update settings of a virtual WAN
    Update(UpdateVirtualWanArgs),
    /// Delete a virtual WAN
    Delete(ResourceArgs),
}

impl VwanCommands {
    pub fn execute<C: NetworkClient>(self, client: &C) -> Result<Option<Value>> {
        match self {
            VwanCommands::Create(args) => to_output(create_virtual_wan(client, args)?),
            VwanCommands::List(args) => {
                to_output(list_virtual_wans(client, args.resource_group.as_deref())?)
            }
            VwanCommands::Show(args) => to_output(show_virtual_wan(client, &args)?),
            VwanCommands::Update(args) => to_output(update_virtual_wan(client, args)?),
            VwanCommands::Delete(args) => {
                delete_virtual_wan(client, &args)?;
                Ok(None)
            }
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateVirtualWanArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual WAN
    #[arg(short, long)]
    pub name: String,
    /// Location
    #[arg(short, long)]
    pub location: Option<String>,
    /// Space-separated tags: key[=value]
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// Name of the security provider
    #[arg(long)]
    pub security_provider_name: Option<String>,
    /// Allow branch-to-branch traffic flow
    #[arg(long)]
    pub branch_to_branch_traffic: Option<bool>,
    /// Allow VNet-to-VNet traffic flow
    #[arg(long)]
    pub vnet_to_vnet_traffic: Option<bool>,
    /// Office 365 local breakout category
    #[arg(long, value_enum, ignore_case = true)]
    pub office365_category: Option<Office365Category>,
    /// Disable VPN encryption
    #[arg(long)]
    pub disable_vpn_encryption: Option<bool>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateVirtualWanArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual WAN
    #[arg(short, long)]
    pub name: String,
    /// Space-separated tags: key[=value], "" clears
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// Name of the security provider
    #[arg(long)]
    pub security_provider_name: Option<String>,
    /// Allow branch-to-branch traffic flow
    #[arg(long)]
    pub branch_to_branch_traffic: Option<bool>,
    /// Allow VNet-to-VNet traffic flow
    #[arg(long)]
    pub vnet_to_vnet_traffic: Option<bool>,
    /// Office 365 local breakout category
    #[arg(long, value_enum, ignore_case = true)]
    pub office365_category: Option<Office365Category>,
    /// Disable VPN encryption
    #[arg(long)]
    pub disable_vpn_encryption: Option<bool>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

/// Patchable fields of a virtual WAN. Only `tags` can be cleared.
#[derive(Debug, Default)]
pub struct VirtualWanPatch {
    pub tags: FieldUpdate<Tags>,
    pub security_provider_name: FieldUpdate<String>,
    pub allow_branch_to_branch_traffic: FieldUpdate<bool>,
    pub allow_vnet_to_vnet_traffic: FieldUpdate<bool>,
    pub office365_local_breakout_category: FieldUpdate<Office365Category>,
    pub disable_vpn_encryption: FieldUpdate<bool>,
}

impl VirtualWanPatch {
    pub fn from_args(args: &UpdateVirtualWanArgs) -> Result<VirtualWanPatch> {
        Ok(VirtualWanPatch {
            tags: parse_tags(args.tags.clone())?,
            security_provider_name: FieldUpdate::from_arg(args.security_provider_name.clone()),
            allow_branch_to_branch_traffic: FieldUpdate::from_option(args.branch_to_branch_traffic),
            allow_vnet_to_vnet_traffic: FieldUpdate::from_option(args.vnet_to_vnet_traffic),
            office365_local_breakout_category: FieldUpdate::from_option(args.office365_category),
            disable_vpn_encryption: FieldUpdate::from_option(args.disable_vpn_encryption),
        })
    }

    /// Apply to `wan`, returning the changed field names.
    pub fn apply(self, wan: &mut VirtualWan) -> Vec<&'static str> {
        let mut c = UpdateContext::new(wan);
        c.update_param("tags", |w| &mut w.tags, self.tags, true)
            .update_param(
                "security_provider_name",
                |w| &mut w.properties_mut().security_provider_name,
                self.security_provider_name,
                false,
            )
            .update_param(
                "allow_branch_to_branch_traffic",
                |w| &mut w.properties_mut().allow_branch_to_branch_traffic,
                self.allow_branch_to_branch_traffic,
                false,
            )
            .update_param(
                "allow_vnet_to_vnet_traffic",
                |w| &mut w.properties_mut().allow_vnet_to_vnet_traffic,
                self.allow_vnet_to_vnet_traffic,
                false,
            )
            .update_param(
                "office365_local_breakout_category",
                |w| &mut w.properties_mut().office365_local_breakout_category,
                self.office365_local_breakout_category,
                false,
            )
            .update_param(
                "disable_vpn_encryption",
                |w| &mut w.properties_mut().disable_vpn_encryption,
                self.disable_vpn_encryption,
                false,
            );
        c.changed().to_vec()
    }
}

pub fn create_virtual_wan<C: NetworkClient>(
    client: &C,
    args: CreateVirtualWanArgs,
) -> Result<VirtualWan> {
    let wan = VirtualWan {
        location: args.location,
        tags: create_tags(args.tags)?,
        properties: Some(VirtualWanProperties {
            disable_vpn_encryption: args.disable_vpn_encryption,
            security_provider_name: args.security_provider_name,
            allow_branch_to_branch_traffic: args.branch_to_branch_traffic,
            allow_vnet_to_vnet_traffic: args.vnet_to_vnet_traffic,
            office365_local_breakout_category: args.office365_category,
            ..Default::default()
        }),
        ..Default::default()
    };
    log::info!("create virtual WAN {}/{}", args.resource_group, args.name);
    let poller = client
        .virtual_wans()
        .create_or_update(&args.resource_group, &args.name, &wan)?;
    finish(poller, args.no_wait)
}

/// Scoped listing with a resource group, subscription wide otherwise.
pub fn list_virtual_wans<C: NetworkClient>(
    client: &C,
    resource_group_name: Option<&str>,
) -> Result<Vec<VirtualWan>> {
    match resource_group_name {
        Some(rg) => client.virtual_wans().list_by_resource_group(rg),
        None => client.virtual_wans().list(),
    }
}

pub fn show_virtual_wan<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<VirtualWan> {
    client.virtual_wans().get(&args.resource_group, &args.name)
}

/// Read, patch in memory, write back once.
pub fn update_virtual_wan<C: NetworkClient>(
    client: &C,
    args: UpdateVirtualWanArgs,
) -> Result<VirtualWan> {
    let patch = VirtualWanPatch::from_args(&args)?;
    let mut wan = client.virtual_wans().get(&args.resource_group, &args.name)?;
    let changed = patch.apply(&mut wan);
    log::info!(
        "update virtual WAN {}/{} fields={changed:?}",
        args.resource_group,
        args.name
    );
    let poller = client
        .virtual_wans()
        .create_or_update(&args.resource_group, &args.name, &wan)?;
    finish(poller, args.no_wait)
}

pub fn delete_virtual_wan<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<()> {
    client
        .virtual_wans()
        .delete(&args.resource_group, &args.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::{MockNetworkClient, Poller};
    use crate::models::Provisioned;

    fn existing_wan() -> VirtualWan {
        VirtualWan {
            name: Some("wan1".to_string()),
            location: Some("westus".to_string()),
            tags: Some([("env".to_string(), "dev".to_string())].into_iter().collect()),
            properties: Some(VirtualWanProperties {
                security_provider_name: Some("zscaler".to_string()),
                allow_branch_to_branch_traffic: Some(false),
                provisioning_state: Some("Succeeded".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_virtual_wan_payload() {
        let mut client = MockNetworkClient::new();
        client
            .virtual_wans
            .expect_create_or_update()
            .withf(|rg, name, wan| {
                let props = wan.properties.as_ref().expect("properties");
                rg == "rg1"
                    && name == "wan1"
                    && wan.location.as_deref() == Some("westus")
                    && wan.tags.is_none()
                    && props.allow_vnet_to_vnet_traffic == Some(true)
                    && props.office365_local_breakout_category == Some(Office365Category::All)
                    && props.security_provider_name.is_none()
            })
            .times(1)
            .returning(|_, _, wan| {
                let mut wan = wan.clone();
                wan.properties_mut().provisioning_state = Some("Succeeded".to_string());
                Ok(Poller::done(wan))
            });

        let wan = create_virtual_wan(
            &client,
            CreateVirtualWanArgs {
                resource_group: "rg1".to_string(),
                name: "wan1".to_string(),
                location: Some("westus".to_string()),
                vnet_to_vnet_traffic: Some(true),
                office365_category: Some(Office365Category::All),
                ..Default::default()
            },
        )
        .expect("create");
        assert_eq!(wan.provisioning_state(), Some("Succeeded"));
    }

    #[test]
    fn test_list_virtual_wans_unscoped() {
        let mut client = MockNetworkClient::new();
        client
            .virtual_wans
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![existing_wan()]));
        client.virtual_wans.expect_list_by_resource_group().never();

        let wans = list_virtual_wans(&client, None).expect("list");
        assert_eq!(wans.len(), 1);
    }

    #[test]
    fn test_list_virtual_wans_scoped() {
        let mut client = MockNetworkClient::new();
        client.virtual_wans.expect_list().never();
        client
            .virtual_wans
            .expect_list_by_resource_group()
            .withf(|rg| rg == "rg1")
            .times(1)
            .returning(|_| Ok(vec![]));

        let wans = list_virtual_wans(&client, Some("rg1")).expect("list");
        assert!(wans.is_empty());
    }

    #[test]
    fn test_patch_clears_tags_and_keeps_rest() {
        let mut wan = existing_wan();
        let patch = VirtualWanPatch::from_args(&UpdateVirtualWanArgs {
            tags: Some(vec![String::new()]),
            security_provider_name: Some(String::new()),
            branch_to_branch_traffic: Some(true),
            ..Default::default()
        })
        .expect("patch");
        let changed = patch.apply(&mut wan);

        assert_eq!(changed, vec!["tags", "allow_branch_to_branch_traffic"]);
        assert!(wan.tags.is_none());
        let props = wan.properties.expect("properties");
        assert_eq!(props.security_provider_name.as_deref(), Some("zscaler"));
        assert_eq!(props.allow_branch_to_branch_traffic, Some(true));
    }

    #[test]
    fn test_update_virtual_wan_reads_patches_writes() {
        let mut client = MockNetworkClient::new();
        client
            .virtual_wans
            .expect_get()
            .withf(|rg, name| rg == "rg1" && name == "wan1")
            .times(1)
            .returning(|_, _| Ok(existing_wan()));
        client
            .virtual_wans
            .expect_create_or_update()
            .withf(|_, _, wan| {
                wan.properties.as_ref().and_then(|p| p.disable_vpn_encryption) == Some(true)
                    && wan.tags.as_ref().and_then(|t| t.get("env")).map(String::as_str)
                        == Some("dev")
            })
            .times(1)
            .returning(|_, _, wan| Ok(Poller::done(wan.clone())));

        let wan = update_virtual_wan(
            &client,
            UpdateVirtualWanArgs {
                resource_group: "rg1".to_string(),
                name: "wan1".to_string(),
                disable_vpn_encryption: Some(true),
                ..Default::default()
            },
        )
        .expect("update");
        assert_eq!(wan.name.as_deref(), Some("wan1"));
    }

    #[test]
    fn test_delete_virtual_wan() {
        let mut client = MockNetworkClient::new();
        client
            .virtual_wans
            .expect_delete()
            .withf(|rg, name| rg == "rg1" && name == "wan1")
            .times(1)
            .returning(|_, _| Ok(()));
        let args = ResourceArgs {
            resource_group: "rg1".to_string(),
            name: "wan1".to_string(),
        };
        assert!(delete_virtual_wan(&client, &args).is_ok());
    }

    #[test]
    fn test_office365_category_accepts_service_spelling() {
        use crate::commands::{Cli, Commands, NetworkCommands};
        use clap::Parser;

        for spelling in ["OptimizeAndAllow", "optimizeandallow"] {
            let cli = Cli::try_parse_from([
                "azure-vwan",
                "network",
                "vwan",
                "update",
                "-g",
                "rg1",
                "-n",
                "wan1",
                "--office365-category",
                spelling,
            ])
            .expect("parse");
            let Commands::Network(NetworkCommands::Vwan(VwanCommands::Update(args))) = cli.command
            else {
                panic!("expected vwan update");
            };
            assert_eq!(args.office365_category, Some(Office365Category::OptimizeAndAllow));
        }
    }
}
