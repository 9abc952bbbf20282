//! Commands enum and subcommands.
//!
//! This module defines the available commands for the CLI tool.

use clap::{Args, Subcommand};
use uuid::Uuid;
use weave_core::{DataType, TenantActivityStatus};

use crate::parser::parse_header;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the tenants of a collection
    Tenants {
        /// Collection to operate on
        #[arg(short, long)]
        collection: String,

        #[command(subcommand)]
        command: TenantsCommand,
    },

    /// Run Generative Function Layer operations on a collection
    Gfl {
        /// Collection to operate on
        #[arg(short, long)]
        collection: String,

        #[command(subcommand)]
        command: GflCommand,
    },

    /// Run the hosted query and transformation agents
    Agent {
        #[command(subcommand)]
        command: AgentCommand,
    },
}

/// Tenant subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TenantsCommand {
    /// List every tenant
    List,

    /// Show the named tenants; missing names are left out
    Get {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Check whether a tenant exists
    Exists { name: String },

    /// Create tenants
    Create {
        #[arg(required = true)]
        names: Vec<String>,
        /// Initial status (ACTIVE or INACTIVE)
        #[arg(short, long)]
        status: Option<TenantActivityStatus>,
    },

    /// Change the status of tenants
    Update {
        #[arg(required = true)]
        names: Vec<String>,
        /// New status (ACTIVE, INACTIVE or OFFLOADED)
        #[arg(short, long)]
        status: TenantActivityStatus,
    },

    /// Remove tenants
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Options shared by `gfl create` and `gfl update`.
#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct WriteArgs {
    /// Restrict the operation to these objects
    #[arg(long = "uuid")]
    pub uuids: Vec<Uuid>,
    /// Tenant to operate on
    #[arg(long)]
    pub tenant: Option<String>,
    /// Generation model
    #[arg(long)]
    pub model: Option<String>,
    /// API key for the generation model
    #[arg(long, env = "WEAVE_MODEL_API_KEY", hide_env_values = true)]
    pub model_api_key: Option<String>,
    /// Header passed to the workflow as NAME=VALUE (repeatable)
    #[arg(long = "request-header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

/// GFL subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum GflCommand {
    /// Generate a new property from existing ones
    Create {
        /// Name of the new property
        property: String,
        /// Data type of the new property
        #[arg(short = 't', long = "data-type", default_value = "text")]
        data_type: DataType,
        /// Properties the model may read
        #[arg(long = "view", required = true)]
        view_properties: Vec<String>,
        /// What to generate
        #[arg(short, long)]
        instruction: String,
        #[command(flatten)]
        write: WriteArgs,
    },

    /// Regenerate existing properties
    Update {
        /// Properties to regenerate
        #[arg(long = "on", required = true)]
        on_properties: Vec<String>,
        /// Properties the model may read
        #[arg(long = "view", required = true)]
        view_properties: Vec<String>,
        /// How to regenerate them
        #[arg(short, long)]
        instruction: String,
        #[command(flatten)]
        write: WriteArgs,
    },

    /// Delete the objects an instruction selects
    Delete {
        /// Properties the model may read to decide
        #[arg(long = "view", required = true)]
        view_properties: Vec<String>,
        /// Which objects to delete
        #[arg(short, long)]
        instruction: String,
    },

    /// Ask a question about the data
    Query {
        query: String,
        /// Collections to search; defaults to --collection
        #[arg(long = "search")]
        collections: Vec<String>,
        #[arg(long)]
        tenant: Option<String>,
        /// Tool functions the agent may call
        #[arg(long = "function")]
        functions: Vec<String>,
        /// Maximum tool invocations
        #[arg(long)]
        call_budget: Option<u32>,
        #[arg(long)]
        lm_provider: Option<String>,
        #[arg(long)]
        model_name: Option<String>,
        /// API key for the language model provider
        #[arg(long, env = "WEAVE_LM_API_KEY", hide_env_values = true)]
        lm_api_key: Option<String>,
        /// Context about the data for the agent
        #[arg(long)]
        description: Option<String>,
    },

    /// Show the state of a workflow
    Status { workflow_id: String },

    /// Poll a workflow until it finishes
    Wait {
        workflow_id: String,
        /// Seconds between polls
        #[arg(long, default_value = "2")]
        interval: u64,
        /// Seconds before giving up
        #[arg(long, default_value = "300")]
        timeout: u64,
    },
}

/// Agent subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AgentCommand {
    /// Ask the query agent a question
    Query {
        query: String,
        /// Collections the agent may search
        #[arg(short, long = "collection", required = true)]
        collections: Vec<String>,
        #[arg(long)]
        tenant: Option<String>,
        /// Properties the agent may read; defaults to all
        #[arg(long = "view")]
        view_properties: Vec<String>,
    },

    /// Generate or regenerate one property with the transformation agent
    Transform {
        /// Collection to operate on
        #[arg(short, long)]
        collection: String,
        /// Property to write
        property: String,
        /// Properties the model may read
        #[arg(long = "view", required = true)]
        view_properties: Vec<String>,
        /// What to generate
        #[arg(short, long)]
        instruction: String,
        /// Data type of a new property; without it the existing property is
        /// regenerated
        #[arg(short = 't', long = "data-type")]
        data_type: Option<DataType>,
    },
}
