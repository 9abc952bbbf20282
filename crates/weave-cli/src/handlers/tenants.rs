//! Tenant command handlers.

use serde_json::{Value, json};
use weave_core::{TenantCreate, TenantUpdate, Tenants};

use crate::commands::TenantsCommand;
use crate::error::CliError;

/// Execute a tenant subcommand against `tenants`.
pub async fn execute(tenants: &Tenants, command: TenantsCommand) -> Result<Value, CliError> {
    match command {
        TenantsCommand::List => {
            let all = tenants.get().await?;
            Ok(serde_json::to_value(all.into_values().collect::<Vec<_>>())?)
        }
        TenantsCommand::Get { names } => {
            let found = tenants.get_by_names(&names).await?;
            Ok(serde_json::to_value(found.into_values().collect::<Vec<_>>())?)
        }
        TenantsCommand::Exists { name } => {
            let exists = tenants.exists(&name).await?;
            Ok(json!({ "name": name, "exists": exists }))
        }
        TenantsCommand::Create { names, status } => {
            let requested = names.iter().map(|name| {
                let tenant = TenantCreate::new(name);
                match status {
                    Some(status) => tenant.with_status(status),
                    None => tenant,
                }
            });
            tenants.create(requested).await?;
            Ok(json!({ "collection": tenants.collection(), "created": names }))
        }
        TenantsCommand::Update { names, status } => {
            tenants
                .update(names.iter().map(|name| TenantUpdate::new(name, status)))
                .await?;
            Ok(json!({
                "collection": tenants.collection(),
                "updated": names,
                "activityStatus": status,
            }))
        }
        TenantsCommand::Remove { names } => {
            tenants.remove(&names).await?;
            Ok(json!({ "collection": tenants.collection(), "removed": names }))
        }
    }
}
