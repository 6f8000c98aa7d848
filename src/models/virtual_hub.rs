//! Azure Virtual Hub and hub VNet connection models.

use super::common::{arm_resource, Extra, SubResource, Tags};
use serde::{Deserialize, Serialize};

/// Regional routing node within a virtual WAN.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHub {
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
    pub properties: Option<VirtualHubProperties>,
    /// Fields not modelled here, sent back unchanged.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHubProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_wan: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_gateway: Option<SubResource>,
    #[serde(
        default,
        rename = "p2SVpnGateway",
        skip_serializing_if = "Option::is_none"
    )]
    pub p2s_vpn_gateway: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub express_route_gateway: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_network_connections: Option<Vec<HubVirtualNetworkConnection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Connection from a hub to a remote virtual network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HubVirtualNetworkConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HubVirtualNetworkConnectionProperties>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HubVirtualNetworkConnectionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_virtual_network: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_hub_to_remote_vnet_transit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_remote_vnet_to_use_hub_vnet_gateways: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_internet_security: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

arm_resource!(VirtualHub);
arm_resource!(HubVirtualNetworkConnection);

impl VirtualHub {
    /// Properties, created empty on first access.
    pub fn properties_mut(&mut self) -> &mut VirtualHubProperties {
        self.properties.get_or_insert_with(Default::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2s_gateway_wire_name() {
        let hub = VirtualHub {
            properties: Some(VirtualHubProperties {
                p2s_vpn_gateway: Some(SubResource::new("p2s-id")),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&hub).expect("serialize");
        assert_eq!(json["properties"]["p2SVpnGateway"]["id"], "p2s-id");
    }

    #[test]
    fn test_parse_hub_with_connections() {
        let json = r#"{
            "name": "hub1",
            "properties": {
                "addressPrefix": "10.0.0.0/24",
                "virtualWan": {"id": "wan-id"},
                "virtualNetworkConnections": [
                    {"name": "conn1", "properties": {"remoteVirtualNetwork": {"id": "vnet1"}}}
                ]
            }
        }"#;
        let hub: VirtualHub = serde_json::from_str(json).expect("parse hub");
        let props = hub.properties.expect("properties");
        assert_eq!(props.address_prefix.as_deref(), Some("10.0.0.0/24"));
        let conns = props.virtual_network_connections.expect("connections");
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].name.as_deref(), Some("conn1"));
    }
}
