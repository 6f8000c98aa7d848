//! Resource models for Azure Virtual WAN.
//!
//! All models mirror the ARM JSON shape and skip absent fields on the wire:
//! - [`VirtualWan`] - virtual WAN
//! - [`VirtualHub`] and [`HubVirtualNetworkConnection`] - hubs and their VNet connections
//! - [`VpnSite`] - on-premises VPN sites
//! - [`VpnGateway`] and [`P2sVpnGateway`] - hub gateways

mod common;
mod virtual_hub;
mod virtual_wan;
mod vpn_gateway;
mod vpn_site;

// Re-export public types
pub use common::{Extra, Named, Page, Provisioned, SubResource, Tags, TERMINAL_STATES};
pub use virtual_hub::{
    HubVirtualNetworkConnection, HubVirtualNetworkConnectionProperties, VirtualHub,
    VirtualHubProperties,
};
pub use virtual_wan::{Office365Category, VirtualWan, VirtualWanProperties};
pub use vpn_gateway::{GatewayProperties, P2sVpnGateway, VpnGateway};
pub use vpn_site::{
    AddressSpace, BgpSettings, DeviceProperties, GetVpnSitesConfigurationRequest, VpnSite,
    VpnSiteProperties,
};
