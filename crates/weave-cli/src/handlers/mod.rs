//! Command handlers that delegate to the facades.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(facade, command) -> Result<Value, CliError>`
//! - Convert CLI input into facade arguments
//! - Return the JSON document to print; `main` does the printing

pub mod agents;
pub mod gfl;
pub mod tenants;
