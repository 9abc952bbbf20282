//! Facades over the ports.
//!
//! Services are what application code calls. They bind a port to a
//! collection, fill in defaults, validate inputs and delegate.

mod agents;
mod gfl;
mod tenants;

pub use agents::{QueryAgent, TransformationAgent};
pub use gfl::Gfl;
pub use tenants::Tenants;
