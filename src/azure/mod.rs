//! Azure interaction.
//!
//! This module handles all Azure-related operations:
//! - [`cli`] - Command execution for Azure CLI
//! - [`client`] - The client traits the command handlers are written against
//! - [`poller`] - Waiting for long-running operations
//! - [`rest`] - ARM implementation of the client over `az rest`

pub mod cli;
pub mod client;
pub mod poller;
pub mod rest;

// Re-export public types and functions
pub use cli::{AzCli, CommandRunner};
pub use client::{
    MockNetworkClient, MockResourceOperations, MockVpnSitesConfigurationOperations,
    NetworkClient, ResourceOperations, VpnSitesConfigurationOperations,
};
pub use poller::Poller;
pub use rest::AzRestClient;
