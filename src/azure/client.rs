//! The client seen by the command handlers.
//!
//! Handlers only depend on these traits, so they run against the ARM client
//! in production and against `mockall` mocks in tests.

use super::poller::Poller;
use crate::error::Result;
use crate::models::{
    GetVpnSitesConfigurationRequest, P2sVpnGateway, VirtualHub, VirtualWan, VpnGateway, VpnSite,
};
use mockall::automock;

/// Operations on one ARM resource kind inside a resource group.
#[automock]
pub trait ResourceOperations<T: 'static> {
    fn create_or_update(&self, resource_group: &str, name: &str, payload: &T)
        -> Result<Poller<T>>;
    fn get(&self, resource_group: &str, name: &str) -> Result<T>;
    /// Every resource of this kind in the subscription.
    fn list(&self) -> Result<Vec<T>>;
    fn list_by_resource_group(&self, resource_group: &str) -> Result<Vec<T>>;
    fn delete(&self, resource_group: &str, name: &str) -> Result<()>;
}

/// VPN site configuration export, scoped to a virtual WAN.
#[automock]
pub trait VpnSitesConfigurationOperations {
    fn download(
        &self,
        resource_group: &str,
        virtual_wan_name: &str,
        request: &GetVpnSitesConfigurationRequest,
    ) -> Result<()>;
}

/// Operation groups per resource kind.
pub trait NetworkClient {
    fn virtual_wans(&self) -> &dyn ResourceOperations<VirtualWan>;
    fn virtual_hubs(&self) -> &dyn ResourceOperations<VirtualHub>;
    fn vpn_sites(&self) -> &dyn ResourceOperations<VpnSite>;
    fn vpn_gateways(&self) -> &dyn ResourceOperations<VpnGateway>;
    fn p2s_vpn_gateways(&self) -> &dyn ResourceOperations<P2sVpnGateway>;
    fn vpn_sites_configuration(&self) -> &dyn VpnSitesConfigurationOperations;
}

/// A [`NetworkClient`] made of mocks, one per operation group.
#[derive(Default)]
pub struct MockNetworkClient {
    pub virtual_wans: MockResourceOperations<VirtualWan>,
    pub virtual_hubs: MockResourceOperations<VirtualHub>,
    pub vpn_sites: MockResourceOperations<VpnSite>,
    pub vpn_gateways: MockResourceOperations<VpnGateway>,
    pub p2s_vpn_gateways: MockResourceOperations<P2sVpnGateway>,
    pub vpn_sites_configuration: MockVpnSitesConfigurationOperations,
}

impl MockNetworkClient {
    pub fn new() -> MockNetworkClient {
        MockNetworkClient::default()
    }
}

impl NetworkClient for MockNetworkClient {
    fn virtual_wans(&self) -> &dyn ResourceOperations<VirtualWan> {
        &self.virtual_wans
    }

    fn virtual_hubs(&self) -> &dyn ResourceOperations<VirtualHub> {
        &self.virtual_hubs
    }

    fn vpn_sites(&self) -> &dyn ResourceOperations<VpnSite> {
        &self.vpn_sites
    }

    fn vpn_gateways(&self) -> &dyn ResourceOperations<VpnGateway> {
        &self.vpn_gateways
    }

    fn p2s_vpn_gateways(&self) -> &dyn ResourceOperations<P2sVpnGateway> {
        &self.p2s_vpn_gateways
    }

    fn vpn_sites_configuration(&self) -> &dyn VpnSitesConfigurationOperations {
        &self.vpn_sites_configuration
    }
}
