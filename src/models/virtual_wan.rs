//! Azure Virtual WAN resource model.

use super::common::{arm_resource, Extra, SubResource, Tags};
use serde::{Deserialize, Serialize};

/// Office 365 traffic categories allowed to break out locally.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum Office365Category {
    Optimize,
    OptimizeAndAllow,
    All,
    None,
}

/// Top-level networking resource grouping hubs and sites.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<VirtualWanProperties>,
    /// Fields not modelled here, sent back unchanged.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWanProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_vpn_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_hubs: Option<Vec<SubResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_sites: Option<Vec<SubResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_branch_to_branch_traffic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_vnet_to_vnet_traffic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office365_local_breakout_category: Option<Office365Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

arm_resource!(VirtualWan);

impl VirtualWan {
    /// Properties, created empty on first access.
    pub fn properties_mut(&mut self) -> &mut VirtualWanProperties {
        self.properties.get_or_insert_with(Default::default)
    }
}
