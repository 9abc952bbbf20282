//! Core domain types, port traits and facades for the weave client.
//!
//! Application code talks to the facades in [`services`]: [`Tenants`] for
//! tenant management and [`Gfl`] for the Generative Function Layer, plus the
//! [`QueryAgent`] and [`TransformationAgent`]. Facades delegate every remote
//! call to a port; `weave-http` provides the HTTP implementations.
//!
//! Each facade is async. Wrap one in [`Blocking`] to call the same methods
//! from synchronous code.
#![deny(unused_crate_dependencies)]

pub mod blocking;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use blocking::Blocking;
pub use domain::{
    DataType, DependentOperationStep, GflDefaults, GflQueryOptions, GflQueryResponse,
    GflResponse, GflStatusResponse, GflWriteOptions, OperationStep, QueryAgentResponse, Tenant,
    TenantActivityStatus, TenantCreate, TenantRef, TenantUpdate, TransformationResponse,
    WorkflowState,
};
pub use ports::{AgentsPort, ClientError, ClientResult, GflPort, TenantsPort};
pub use services::{Gfl, QueryAgent, Tenants, TransformationAgent};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
