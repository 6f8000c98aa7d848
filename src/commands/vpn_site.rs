//! `network vpn-site` handlers.

use super::{create_tags, finish, parse_tags, to_output, ListArgs, ResourceArgs};
use crate::azure::NetworkClient;
use crate::error::Result;
use crate::models::{
    AddressSpace, BgpSettings, DeviceProperties, GetVpnSitesConfigurationRequest, SubResource,
    Tags, VpnSite, VpnSiteProperties,
};
use crate::processing::{FieldUpdate, UpdateContext};
use clap::{Args, Subcommand};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum VpnSiteCommands {
    /// Create a VPN site configuration
    Create(CreateVpnSiteArgs),
    /// List VPN site configurations
    List(ListArgs),
    /// Get the details of a VPN site configuration
    Show(ResourceArgs),
    /// Update settings of a VPN site configuration
    Update(UpdateVpnSiteArgs),
    /// Delete a VPN site configuration
    Delete(ResourceArgs),
    /// Provide a SAS-URL to download the configuration for a VPN site
    Download(DownloadVpnSiteArgs),
}

impl VpnSiteCommands {
    pub fn execute<C: NetworkClient>(self, client: &C) -> Result<Option<Value>> {
        match self {
            VpnSiteCommands::Create(args) => to_output(create_vpn_site(client, args)?),
            VpnSiteCommands::List(args) => {
                to_output(list_vpn_sites(client, args.resource_group.as_deref())?)
            }
            VpnSiteCommands::Show(args) => to_output(show_vpn_site(client, &args)?),
            VpnSiteCommands::Update(args) => to_output(update_vpn_site(client, args)?),
            VpnSiteCommands::Delete(args) => {
                delete_vpn_site(client, &args)?;
                Ok(None)
            }
            VpnSiteCommands::Download(args) => {
                download_vpn_site_configuration(client, args)?;
                Ok(None)
            }
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateVpnSiteArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the VPN site
    #[arg(short, long)]
    pub name: String,
    /// IP address of the VPN site
    #[arg(long)]
    pub ip_address: String,
    /// BGP speaker's ASN
    #[arg(long)]
    pub asn: i64,
    /// Peering address and BGP identifier of this BGP speaker
    #[arg(long)]
    pub bgp_peering_address: String,
    /// ID of the virtual WAN
    #[arg(long)]
    pub virtual_wan: Option<String>,
    /// Location
    #[arg(short, long)]
    pub location: Option<String>,
    /// Space-separated tags: key[=value]
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// Key for the VPN site that can be used for connections
    #[arg(long)]
    pub site_key: Option<String>,
    /// Space-separated list of CIDR address prefixes
    #[arg(long, num_args = 1..)]
    pub address_prefixes: Option<Vec<String>>,
    /// Whether the VPN site is security-related
    #[arg(long)]
    pub security_site: Option<bool>,
    /// Name of the device vendor
    #[arg(long)]
    pub device_vendor: Option<String>,
    /// Model of the device
    #[arg(long)]
    pub device_model: Option<String>,
    /// Link speed in Mbps
    #[arg(long)]
    pub link_speed: Option<i32>,
    /// Weight added to routes learned from this BGP speaker
    #[arg(long)]
    pub peer_weight: Option<i32>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateVpnSiteArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the VPN site
    #[arg(short, long)]
    pub name: String,
    /// IP address of the VPN site
    #[arg(long)]
    pub ip_address: Option<String>,
    /// ID of the virtual WAN
    #[arg(long)]
    pub virtual_wan: Option<String>,
    /// Space-separated tags: key[=value], "" clears
    #[arg(long, num_args = 0..)]
    pub tags: Option<Vec<String>>,
    /// Key for the VPN site, "" clears
    #[arg(long)]
    pub site_key: Option<String>,
    /// Space-separated list of CIDR address prefixes
    #[arg(long, num_args = 1..)]
    pub address_prefixes: Option<Vec<String>>,
    /// Whether the VPN site is security-related
    #[arg(long)]
    pub security_site: Option<bool>,
    /// Name of the device vendor, "" clears
    #[arg(long)]
    pub device_vendor: Option<String>,
    /// Model of the device, "" clears
    #[arg(long)]
    pub device_model: Option<String>,
    /// Link speed in Mbps
    #[arg(long)]
    pub link_speed: Option<i32>,
    /// BGP speaker's ASN
    #[arg(long)]
    pub asn: Option<i64>,
    /// Peering address and BGP identifier of this BGP speaker
    #[arg(long)]
    pub bgp_peering_address: Option<String>,
    /// Weight added to routes learned from this BGP speaker
    #[arg(long)]
    pub peer_weight: Option<i32>,
    /// Do not wait for the long-running operation to finish
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DownloadVpnSiteArgs {
    /// Name of resource group
    #[arg(short = 'g', long)]
    pub resource_group: String,
    /// Name of the virtual WAN the sites belong to
    #[arg(long)]
    pub vwan_name: String,
    /// Space-separated list of VPN site IDs
    #[arg(long, num_args = 1.., required = true)]
    pub vpn_sites: Vec<String>,
    /// SAS URL of the blob receiving the configuration
    #[arg(long)]
    pub output_blob_sas_url: String,
}

/// Patchable fields of a VPN site, grouped by the block they live in.
///
/// Clearable: tags, site key, device vendor and device model.
#[derive(Debug, Default)]
pub struct VpnSitePatch {
    pub tags: FieldUpdate<Tags>,
    pub ip_address: FieldUpdate<String>,
    pub virtual_wan: FieldUpdate<SubResource>,
    pub is_security_site: FieldUpdate<bool>,
    pub site_key: FieldUpdate<String>,
    pub device_vendor: FieldUpdate<String>,
    pub device_model: FieldUpdate<String>,
    pub link_speed_in_mbps: FieldUpdate<i32>,
    pub address_prefixes: FieldUpdate<Vec<String>>,
    pub asn: FieldUpdate<i64>,
    pub bgp_peering_address: FieldUpdate<String>,
    pub peer_weight: FieldUpdate<i32>,
}

impl VpnSitePatch {
    pub fn from_args(args: &UpdateVpnSiteArgs) -> Result<VpnSitePatch> {
        Ok(VpnSitePatch {
            tags: parse_tags(args.tags.clone())?,
            ip_address: FieldUpdate::from_arg(args.ip_address.clone()),
            virtual_wan: FieldUpdate::from_arg(args.virtual_wan.clone()).map(SubResource::new),
            is_security_site: FieldUpdate::from_option(args.security_site),
            site_key: FieldUpdate::from_arg(args.site_key.clone()),
            device_vendor: FieldUpdate::from_arg(args.device_vendor.clone()),
            device_model: FieldUpdate::from_arg(args.device_model.clone()),
            link_speed_in_mbps: FieldUpdate::from_option(args.link_speed),
            address_prefixes: FieldUpdate::from_option(args.address_prefixes.clone()),
            asn: FieldUpdate::from_option(args.asn),
            bgp_peering_address: FieldUpdate::from_arg(args.bgp_peering_address.clone()),
            peer_weight: FieldUpdate::from_option(args.peer_weight),
        })
    }

    /// Apply every block to `site` in memory, returning the changed field names.
    pub fn apply(self, site: &mut VpnSite) -> Vec<&'static str> {
        let mut changed = Vec::new();

        let mut c = UpdateContext::new(&mut *site);
        c.update_param("tags", |s| &mut s.tags, self.tags, true)
            .update_param(
                "ip_address",
                |s| &mut s.properties_mut().ip_address,
                self.ip_address,
                false,
            )
            .update_param(
                "virtual_wan",
                |s| &mut s.properties_mut().virtual_wan,
                self.virtual_wan,
                false,
            )
            .update_param(
                "is_security_site",
                |s| &mut s.properties_mut().is_security_site,
                self.is_security_site,
                false,
            )
            .update_param(
                "site_key",
                |s| &mut s.properties_mut().site_key,
                self.site_key,
                true,
            );
        changed.extend_from_slice(c.changed());

        let props = site.properties_mut();

        let mut c = UpdateContext::new(&mut props.device_properties);
        c.update_param("device_vendor", |d| &mut device(d).device_vendor, self.device_vendor, true)
            .update_param("device_model", |d| &mut device(d).device_model, self.device_model, true)
            .update_param(
                "link_speed_in_mbps",
                |d| &mut device(d).link_speed_in_mbps,
                self.link_speed_in_mbps,
                false,
            );
        changed.extend_from_slice(c.changed());

        let mut c = UpdateContext::new(&mut props.address_space);
        c.update_param(
            "address_prefixes",
            |a| &mut a.get_or_insert_with(AddressSpace::default).address_prefixes,
            self.address_prefixes,
            false,
        );
        changed.extend_from_slice(c.changed());

        let mut c = UpdateContext::new(&mut props.bgp_properties);
        c.update_param("asn", |b| &mut bgp(b).asn, self.asn, false)
            .update_param(
                "bgp_peering_address",
                |b| &mut bgp(b).bgp_peering_address,
                self.bgp_peering_address,
                false,
            )
            .update_param("peer_weight", |b| &mut bgp(b).peer_weight, self.peer_weight, false);
        changed.extend_from_slice(c.changed());

        changed
    }
}

fn device(d: &mut Option<DeviceProperties>) -> &mut DeviceProperties {
    d.get_or_insert_with(DeviceProperties::default)
}

fn bgp(b: &mut Option<BgpSettings>) -> &mut BgpSettings {
    b.get_or_insert_with(BgpSettings::default)
}

/// Optional blocks are only sent when one of their fields was given.
pub fn create_vpn_site<C: NetworkClient>(client: &C, args: CreateVpnSiteArgs) -> Result<VpnSite> {
    let device_properties = DeviceProperties {
        device_vendor: args.device_vendor,
        device_model: args.device_model,
        link_speed_in_mbps: args.link_speed,
        ..Default::default()
    };
    let site = VpnSite {
        location: args.location,
        tags: create_tags(args.tags)?,
        properties: Some(VpnSiteProperties {
            is_security_site: args.security_site,
            ip_address: Some(args.ip_address),
            site_key: args.site_key,
            virtual_wan: SubResource::from_id(args.virtual_wan.as_deref()),
            address_space: args.address_prefixes.map(|prefixes| AddressSpace {
                address_prefixes: Some(prefixes),
                ..Default::default()
            }),
            device_properties: (!device_properties.is_empty()).then_some(device_properties),
            bgp_properties: Some(BgpSettings {
                asn: Some(args.asn),
                bgp_peering_address: Some(args.bgp_peering_address),
                peer_weight: args.peer_weight,
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    };
    log::info!("create VPN site {}/{}", args.resource_group, args.name);
    let poller = client
        .vpn_sites()
        .create_or_update(&args.resource_group, &args.name, &site)?;
    finish(poller, args.no_wait)
}

pub fn list_vpn_sites<C: NetworkClient>(
    client: &C,
    resource_group_name: Option<&str>,
) -> Result<Vec<VpnSite>> {
    match resource_group_name {
        Some(rg) => client.vpn_sites().list_by_resource_group(rg),
        None => client.vpn_sites().list(),
    }
}

pub fn show_vpn_site<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<VpnSite> {
    client.vpn_sites().get(&args.resource_group, &args.name)
}

/// Site, device, address space and BGP changes go out in one write.
pub fn update_vpn_site<C: NetworkClient>(client: &C, args: UpdateVpnSiteArgs) -> Result<VpnSite> {
    let patch = VpnSitePatch::from_args(&args)?;
    let mut site = client.vpn_sites().get(&args.resource_group, &args.name)?;
    let changed = patch.apply(&mut site);
    log::info!(
        "update VPN site {}/{} fields={changed:?}",
        args.resource_group,
        args.name
    );
    let poller = client
        .vpn_sites()
        .create_or_update(&args.resource_group, &args.name, &site)?;
    finish(poller, args.no_wait)
}

pub fn delete_vpn_site<C: NetworkClient>(client: &C, args: &ResourceArgs) -> Result<()> {
    client.vpn_sites().delete(&args.resource_group, &args.name)
}

pub fn download_vpn_site_configuration<C: NetworkClient>(
    client: &C,
    args: DownloadVpnSiteArgs,
) -> Result<()> {
    let request = GetVpnSitesConfigurationRequest {
        vpn_sites: args.vpn_sites,
        output_blob_sas_url: args.output_blob_sas_url,
    };
    log::info!(
        "download configuration of {} VPN site(s) in virtual WAN {}/{}",
        request.vpn_sites.len(),
        args.resource_group,
        args.vwan_name
    );
    client
        .vpn_sites_configuration()
        .download(&args.resource_group, &args.vwan_name, &request)
}
