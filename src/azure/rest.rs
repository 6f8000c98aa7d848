//! ARM client driving `az rest`.
//!
//! Each operation group builds the ARM URL for its resource kind and lets the
//! Azure CLI handle authentication and transport.

use super::cli::{self, CommandRunner};
use super::client::{NetworkClient, ResourceOperations, VpnSitesConfigurationOperations};
use super::poller::Poller;
use crate::config::{self, Settings};
use crate::error::{Result, VwanError};
use crate::models::{
    GetVpnSitesConfigurationRequest, P2sVpnGateway, Page, Provisioned, VirtualHub, VirtualWan,
    VpnGateway, VpnSite,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Duration;

/// Subscription scoped ARM location shared by all operation groups.
#[derive(Clone)]
struct ArmScope {
    runner: Rc<dyn CommandRunner>,
    subscription_id: String,
    api_version: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl ArmScope {
    fn subscription_url(&self) -> String {
        format!(
            "{}/subscriptions/{}",
            config::ARM_ENDPOINT,
            self.subscription_id
        )
    }

    fn resource_group_url(&self, resource_group: &str) -> String {
        format!(
            "{}/resourceGroups/{resource_group}",
            self.subscription_url()
        )
    }

    fn with_api_version(&self, url: String) -> String {
        format!("{url}?api-version={}", self.api_version)
    }

    fn rest(&self, method: &str, url: &str, body: Option<String>) -> Result<String> {
        let mut args = vec![
            "rest".to_string(),
            "--method".to_string(),
            method.to_string(),
            "--url".to_string(),
            url.to_string(),
        ];
        if let Some(body) = body {
            args.push("--body".to_string());
            args.push(body);
        }
        args.push("--output".to_string());
        args.push("json".to_string());
        self.runner.run_az(&args)
    }
}

/// Decode `az` output, naming the JSON path on failure.
fn decode<T: DeserializeOwned>(output: &str, what: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        VwanError::Json(format!("Error parsing {what}: path={} error={}", e.path(), e))
    })
}

/// [`ResourceOperations`] for `Microsoft.Network/{collection}`.
pub struct ArmOperations<T> {
    scope: ArmScope,
    collection: &'static str,
    kind: PhantomData<T>,
}

impl<T> ArmOperations<T> {
    fn new(scope: ArmScope, collection: &'static str) -> ArmOperations<T> {
        ArmOperations {
            scope,
            collection,
            kind: PhantomData,
        }
    }

    pub fn resource_url(&self, resource_group: &str, name: &str) -> String {
        self.scope.with_api_version(format!(
            "{}/providers/Microsoft.Network/{}/{name}",
            self.scope.resource_group_url(resource_group),
            self.collection
        ))
    }

    pub fn subscription_list_url(&self) -> String {
        self.scope.with_api_version(format!(
            "{}/providers/Microsoft.Network/{}",
            self.scope.subscription_url(),
            self.collection
        ))
    }

    pub fn resource_group_list_url(&self, resource_group: &str) -> String {
        self.scope.with_api_version(format!(
            "{}/providers/Microsoft.Network/{}",
            self.scope.resource_group_url(resource_group),
            self.collection
        ))
    }
}

impl<T> ArmOperations<T>
where
    T: DeserializeOwned,
{
    /// Read every page, following `nextLink`.
    fn list_pages(&self, first_url: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut url = first_url;
        let mut count_pages = 0;

        loop {
            let output = self.scope.rest("get", &url, None)?;
            let what = format!("{} page {count_pages}", self.collection);
            let page: Page<T> = decode(&output, &what)?;
            let count = page.value.len();
            items.extend(page.value);

            log::info!(
                "got {collection} page#{count_pages:2} record_count=+{count:3} => {total:3}",
                collection = self.collection,
                total = items.len(),
            );
            count_pages += 1;

            visited.insert(url);
            match page.next_link {
                Some(next) if visited.contains(&next) => {
                    return Err(VwanError::Remote(format!(
                        "nextLink not unique - possible infinite loop: {next}"
                    )));
                }
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(items)
    }
}

impl<T> ResourceOperations<T> for ArmOperations<T>
where
    T: Serialize + DeserializeOwned + Provisioned + 'static,
{
    fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        payload: &T,
    ) -> Result<Poller<T>> {
        let url = self.resource_url(resource_group, name);
        let body = serde_json::to_string(payload)?;
        log::info!("PUT {} {resource_group}/{name}", self.collection);

        let output = self.scope.rest("put", &url, Some(body))?;
        let initial: T = decode(&output, self.collection)?;

        let scope = self.scope.clone();
        let collection = self.collection;
        Ok(Poller::new(
            initial,
            self.scope.poll_interval,
            self.scope.max_polls,
            move || {
                let output = scope.rest("get", &url, None)?;
                decode(&output, collection)
            },
        ))
    }

    fn get(&self, resource_group: &str, name: &str) -> Result<T> {
        let output = self
            .scope
            .rest("get", &self.resource_url(resource_group, name), None)?;
        decode(&output, self.collection)
    }

    fn list(&self) -> Result<Vec<T>> {
        self.list_pages(self.subscription_list_url())
    }

    fn list_by_resource_group(&self, resource_group: &str) -> Result<Vec<T>> {
        self.list_pages(self.resource_group_list_url(resource_group))
    }

    fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        log::info!("DELETE {} {resource_group}/{name}", self.collection);
        self.scope
            .rest("delete", &self.resource_url(resource_group, name), None)?;
        Ok(())
    }
}

/// `vpnConfiguration` action on a virtual WAN.
pub struct ArmVpnSitesConfiguration {
    scope: ArmScope,
}

impl ArmVpnSitesConfiguration {
    pub fn download_url(&self, resource_group: &str, virtual_wan_name: &str) -> String {
        self.scope.with_api_version(format!(
            "{}/providers/Microsoft.Network/virtualWans/{virtual_wan_name}/vpnConfiguration",
            self.scope.resource_group_url(resource_group)
        ))
    }
}

impl VpnSitesConfigurationOperations for ArmVpnSitesConfiguration {
    fn download(
        &self,
        resource_group: &str,
        virtual_wan_name: &str,
        request: &GetVpnSitesConfigurationRequest,
    ) -> Result<()> {
        let body = serde_json::to_string(request)?;
        self.scope.rest(
            "post",
            &self.download_url(resource_group, virtual_wan_name),
            Some(body),
        )?;
        Ok(())
    }
}

/// Production [`NetworkClient`].
pub struct AzRestClient {
    virtual_wans: ArmOperations<VirtualWan>,
    virtual_hubs: ArmOperations<VirtualHub>,
    vpn_sites: ArmOperations<VpnSite>,
    vpn_gateways: ArmOperations<VpnGateway>,
    p2s_vpn_gateways: ArmOperations<P2sVpnGateway>,
    vpn_sites_configuration: ArmVpnSitesConfiguration,
}

impl AzRestClient {
    /// Build the client, asking `az account show` for the subscription when
    /// the settings carry none.
    pub fn new(settings: &Settings, runner: Rc<dyn CommandRunner>) -> Result<AzRestClient> {
        let subscription_id = match &settings.subscription_id {
            Some(id) => id.clone(),
            None => default_subscription(runner.as_ref())?,
        };
        log::info!("Using subscription {subscription_id}");

        let scope = ArmScope {
            runner,
            subscription_id,
            api_version: settings.api_version.clone(),
            poll_interval: Duration::from_millis(settings.poll_interval_msec),
            max_polls: settings.max_polls,
        };

        Ok(AzRestClient {
            virtual_wans: ArmOperations::new(scope.clone(), "virtualWans"),
            virtual_hubs: ArmOperations::new(scope.clone(), "virtualHubs"),
            vpn_sites: ArmOperations::new(scope.clone(), "vpnSites"),
            vpn_gateways: ArmOperations::new(scope.clone(), "vpnGateways"),
            p2s_vpn_gateways: ArmOperations::new(scope.clone(), "p2svpnGateways"),
            vpn_sites_configuration: ArmVpnSitesConfiguration { scope },
        })
    }
}

/// Subscription currently selected in the Azure CLI.
fn default_subscription(runner: &dyn CommandRunner) -> Result<String> {
    let args = cli::split_args("account show --query id --output tsv");
    let id = runner.run_az(&args)?.trim().to_string();
    if id.is_empty() {
        return Err(VwanError::Configuration(format!(
            "No subscription: set {} or run 'az login'",
            config::ENV_SUBSCRIPTION
        )));
    }
    Ok(id)
}

impl NetworkClient for AzRestClient {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::cli::MockCommandRunner;

    const SUB: &str = "00000000-0000-0000-0000-000000000001";

    fn settings() -> Settings {
        Settings {
            subscription_id: Some(SUB.to_string()),
            poll_interval_msec: 0,
            ..Default::default()
        }
    }

    fn client(runner: MockCommandRunner) -> AzRestClient {
        AzRestClient::new(&settings(), Rc::new(runner)).expect("client")
    }

    fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_resource_urls() {
        let client = client(MockCommandRunner::new());
        assert_eq!(
            client.virtual_hubs.resource_url("rg1", "hub1"),
            format!("https://management.azure.com/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs/hub1?api-version=2018-08-01")
        );
        assert_eq!(
            client.vpn_sites.subscription_list_url(),
            format!("https://management.azure.com/subscriptions/{SUB}/providers/Microsoft.Network/vpnSites?api-version=2018-08-01")
        );
        assert_eq!(
            client.virtual_wans.resource_group_list_url("rg1"),
            format!("https://management.azure.com/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualWans?api-version=2018-08-01")
        );
        assert_eq!(
            client.vpn_sites_configuration.download_url("rg1", "wan1"),
            format!("https://management.azure.com/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualWans/wan1/vpnConfiguration?api-version=2018-08-01")
        );
    }

    #[test]
    fn test_subscription_from_az_account() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .withf(|args| args.join(" ") == "account show --query id --output tsv")
            .times(1)
            .returning(|_| Ok("abc\n".to_string()));
        let client = AzRestClient::new(&Settings::default(), Rc::new(runner)).expect("client");
        assert!(client.virtual_wans.subscription_list_url().contains("/subscriptions/abc/"));
    }

    #[test]
    fn test_empty_subscription_is_configuration_error() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run_az().returning(|_| Ok("\n".to_string()));
        let err = AzRestClient::new(&Settings::default(), Rc::new(runner))
            .err()
            .expect("error");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_list_follows_next_link() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .withf(|args| arg_after(args, "--url").is_some_and(|u| u.contains("virtualWans?")))
            .times(1)
            .returning(|_| {
                Ok(r#"{"value":[{"name":"wan1"}],"nextLink":"https://next/page2"}"#.to_string())
            });
        runner
            .expect_run_az()
            .withf(|args| arg_after(args, "--url") == Some("https://next/page2"))
            .times(1)
            .returning(|_| Ok(r#"{"value":[{"name":"wan2"}]}"#.to_string()));

        let wans = client(runner).virtual_wans().list().expect("list");
        let names: Vec<_> = wans.iter().filter_map(|w| w.name.as_deref()).collect();
        assert_eq!(names, vec!["wan1", "wan2"]);
    }

    #[test]
    fn test_list_repeated_next_link_is_error() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .returning(|_| Ok(r#"{"value":[],"nextLink":"https://next/same"}"#.to_string()));
        let err = client(runner).vpn_sites().list().unwrap_err();
        assert!(err.to_string().contains("nextLink"), "got {err}");
    }

    #[test]
    fn test_list_next_link_cycle_is_error() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .withf(|args| arg_after(args, "--url").is_some_and(|u| u.contains("vpnSites?")))
            .times(1)
            .returning(|_| {
                Ok(r#"{"value":[{"name":"site1"}],"nextLink":"https://next/page2"}"#.to_string())
            });
        runner
            .expect_run_az()
            .withf(|args| arg_after(args, "--url") == Some("https://next/page2"))
            .times(1)
            .returning(|_| {
                let first = format!(
                    "https://management.azure.com/subscriptions/{SUB}/providers/Microsoft.Network/vpnSites?api-version=2018-08-01"
                );
                Ok(serde_json::json!({"value": [{"name": "site2"}], "nextLink": first}).to_string())
            });

        let err = client(runner).vpn_sites().list().unwrap_err();
        assert!(matches!(err, VwanError::Remote(_)), "got {err:?}");
        assert!(err.to_string().contains("possible infinite loop"), "got {err}");
    }

    #[test]
    fn test_list_by_resource_group_url() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .withf(|args| {
                arg_after(args, "--method") == Some("get")
                    && arg_after(args, "--url").is_some_and(|u| {
                        u.contains("/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs?")
                    })
            })
            .times(1)
            .returning(|_| Ok(r#"{"value":[{"name":"hub1"}]}"#.to_string()));
        let hubs = client(runner).virtual_hubs().list_by_resource_group("rg1").expect("list");
        assert_eq!(hubs.len(), 1);
    }

    #[test]
    fn test_create_or_update_puts_body_and_polls() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .withf(|args| {
                arg_after(args, "--method") == Some("put")
                    && arg_after(args, "--body")
                        == Some(r#"{"location":"westus","properties":{"allowBranchToBranchTraffic":true}}"#)
            })
            .times(1)
            .returning(|_| {
                Ok(r#"{"name":"wan1","properties":{"provisioningState":"Updating"}}"#.to_string())
            });
        runner
            .expect_run_az()
            .withf(|args| arg_after(args, "--method") == Some("get"))
            .times(1)
            .returning(|_| {
                Ok(r#"{"name":"wan1","properties":{"provisioningState":"Succeeded"}}"#.to_string())
            });

        let wan = VirtualWan {
            location: Some("westus".to_string()),
            properties: Some(crate::models::VirtualWanProperties {
                allow_branch_to_branch_traffic: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let client = client(runner);
        let result = client
            .virtual_wans()
            .create_or_update("rg1", "wan1", &wan)
            .expect("put")
            .result()
            .expect("poll");
        assert_eq!(result.provisioning_state(), Some("Succeeded"));
    }

    #[test]
    fn test_decode_error_names_path() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .returning(|_| {
                Ok(r#"{"properties":{"bgpProperties":{"asn":"not-a-number"}}}"#.to_string())
            });
        let err = client(runner).vpn_sites().get("rg1", "site1").unwrap_err();
        assert!(
            err.to_string().contains("properties.bgpProperties.asn"),
            "got {err}"
        );
    }

    #[test]
    fn test_remote_error_propagates() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_az()
            .returning(|_| {
                Err(VwanError::Remote(
                    "ERROR running: (ResourceNotFound)".to_string(),
                ))
            });
        let err = client(runner).virtual_hubs().get("rg1", "nope").unwrap_err();
        assert_eq!(
            err,
            VwanError::Remote("ERROR running: (ResourceNotFound)".to_string())
        );
    }
}
