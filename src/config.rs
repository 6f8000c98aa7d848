//! Runtime configuration and constants.

use crate::error::{Result, VwanError};
use std::env;

/// ARM endpoint all resource URLs are built on.
pub const ARM_ENDPOINT: &str = "https://management.azure.com";
/// Network API version the virtual WAN resources were introduced with.
pub const DEFAULT_API_VERSION: &str = "2018-08-01";
/// Delay between two polls of a long-running create/update.
pub const POLL_INTERVAL_MSEC: u64 = 2_000;
/// Upper bound on polls before giving up on a long-running operation.
/// One hour at the default interval.
pub const MAX_POLLS: u32 = 1_800;
/// Safety limit on a single `az` response.
pub const MAX_OUTPUT_BYTES: usize = 5_000_000;

pub const ENV_SUBSCRIPTION: &str = "AZURE_SUBSCRIPTION_ID";
pub const ENV_API_VERSION: &str = "VWAN_API_VERSION";
pub const ENV_POLL_INTERVAL: &str = "VWAN_POLL_INTERVAL_MSEC";
pub const ENV_MAX_POLLS: &str = "VWAN_MAX_POLLS";

/// Settings resolved from the environment (and `.env`, loaded in main).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub subscription_id: Option<String>,
    pub api_version: String,
    pub poll_interval_msec: u64,
    pub max_polls: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            subscription_id: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval_msec: POLL_INTERVAL_MSEC,
            max_polls: MAX_POLLS,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        settings.subscription_id = get(ENV_SUBSCRIPTION);
        if let Some(version) = get(ENV_API_VERSION) {
            settings.api_version = version;
        }
        if let Some(interval) = get(ENV_POLL_INTERVAL) {
            settings.poll_interval_msec = interval.trim().parse().map_err(|e| {
                VwanError::Configuration(format!(
                    "{ENV_POLL_INTERVAL}='{interval}' is not a number: {e}"
                ))
            })?;
        }
        if let Some(polls) = get(ENV_MAX_POLLS) {
            settings.max_polls = polls.trim().parse().map_err(|e| {
                VwanError::Configuration(format!("{ENV_MAX_POLLS}='{polls}' is not a number: {e}"))
            })?;
        }
        log::debug!("settings={settings:?}");
        Ok(settings)
    }

    /// Command line flag wins over the environment.
    pub fn with_subscription(mut self, subscription: Option<String>) -> Settings {
        if subscription.is_some() {
            self.subscription_id = subscription;
        }
        self
    }
}
