//! Command-line client for tenant management, the Generative Function Layer
//! and the hosted agents.
//!
//! `main.rs` parses arguments, builds a [`CliContext`] through
//! [`bootstrap`] and routes each command to a handler. Handlers return the
//! JSON document to print.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{AgentCommand, Commands, GflCommand, TenantsCommand};
pub use error::CliError;
pub use parser::Cli;
