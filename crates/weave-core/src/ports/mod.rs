//! Port definitions (trait abstractions) for the remote services.
//!
//! Ports are the dispatch collaborators the facades delegate to. They
//! contain no transport details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP types in any signature
//! - Collection-scoped primitives, one remote request per call
//! - Every failure is a [`ClientError`]

pub mod agents;
pub mod error;
pub mod gfl;
pub mod tenants;

pub use agents::AgentsPort;
pub use error::{ClientError, ClientResult};
pub use gfl::GflPort;
pub use tenants::TenantsPort;
