#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// RestClient<B> is reachable only through DefaultRestClient and the port traits
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;
mod weave;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultRestClient;
pub use weave::{CollectionHandle, WeaveClient};

// Configuration
pub use config::{
    ClientConfig, DEFAULT_AGENTS_HOST, DEFAULT_CLUSTER_URL, DEFAULT_GFL_HOST, ENV_AGENTS_HOST,
    ENV_API_KEY, ENV_CLUSTER_URL, ENV_GFL_HOST,
};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
