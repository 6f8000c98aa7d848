//! Azure VPN site model: an on-premises location's connectivity parameters.

use super::common::{arm_resource, Extra, SubResource, Tags};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VpnSite {
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
    pub properties: Option<VpnSiteProperties>,
    /// Fields not modelled here, sent back unchanged.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VpnSiteProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_wan: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_properties: Option<DeviceProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_space: Option<AddressSpace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgp_properties: Option<BgpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_security_site: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_speed_in_mbps: Option<i32>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DeviceProperties {
    pub fn is_empty(&self) -> bool {
        self.device_vendor.is_none()
            && self.device_model.is_none()
            && self.link_speed_in_mbps.is_none()
            && self.extra.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_prefixes: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BgpSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgp_peering_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_weight: Option<i32>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a `vpnConfiguration` download request on a virtual WAN.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetVpnSitesConfigurationRequest {
    pub vpn_sites: Vec<String>,
    pub output_blob_sas_url: String,
}

arm_resource!(VpnSite);

impl VpnSite {
    /// Properties, created empty on first access.
    pub fn properties_mut(&mut self) -> &mut VpnSiteProperties {
        self.properties.get_or_insert_with(Default::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site() {
        let json = r#"{
            "name": "site1",
            "location": "westus",
            "properties": {
                "ipAddress": "1.2.3.4",
                "siteKey": "secret",
                "addressSpace": {"addressPrefixes": ["10.1.0.0/16"]},
                "bgpProperties": {"asn": 65001, "bgpPeeringAddress": "10.1.0.1", "peerWeight": 0},
                "deviceProperties": {"deviceVendor": "Contoso", "linkSpeedInMbps": 100}
            }
        }"#;
        let site: VpnSite = serde_json::from_str(json).expect("parse site");
        let props = site.properties.expect("properties");
        assert_eq!(props.ip_address.as_deref(), Some("1.2.3.4"));
        let bgp = props.bgp_properties.expect("bgp");
        assert_eq!(bgp.asn, Some(65001));
        let device = props.device_properties.expect("device");
        assert_eq!(device.link_speed_in_mbps, Some(100));
        assert!(device.device_model.is_none());
        assert!(!device.is_empty());
    }

    #[test]
    fn test_download_request_wire_names() {
        let req = GetVpnSitesConfigurationRequest {
            vpn_sites: vec!["site-id".to_string()],
            output_blob_sas_url: "https://blob/sas".to_string(),
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"vpnSites": ["site-id"], "outputBlobSasUrl": "https://blob/sas"})
        );
    }
}
