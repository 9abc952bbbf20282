//! GFL command handlers.

use std::time::Duration;

use serde_json::Value;
use weave_core::{Gfl, GflQueryOptions, GflWriteOptions};

use crate::commands::{GflCommand, WriteArgs};
use crate::error::CliError;

/// Execute a GFL subcommand against `gfl`.
pub async fn execute(gfl: &Gfl, command: GflCommand) -> Result<Value, CliError> {
    match command {
        GflCommand::Create {
            property,
            data_type,
            view_properties,
            instruction,
            write,
        } => {
            let response = gfl
                .create(
                    property,
                    data_type,
                    view_properties,
                    instruction,
                    write_options(write),
                )
                .await?;
            Ok(serde_json::to_value(response)?)
        }
        GflCommand::Update {
            on_properties,
            view_properties,
            instruction,
            write,
        } => {
            let response = gfl
                .update(
                    instruction,
                    view_properties,
                    on_properties,
                    write_options(write),
                )
                .await?;
            Ok(serde_json::to_value(response)?)
        }
        GflCommand::Delete {
            view_properties,
            instruction,
        } => {
            let response = gfl.delete_object(instruction, view_properties).await?;
            Ok(serde_json::to_value(response)?)
        }
        GflCommand::Query {
            query,
            collections,
            tenant,
            functions,
            call_budget,
            lm_provider,
            model_name,
            lm_api_key,
            description,
        } => {
            let mut options = GflQueryOptions::new();
            if !collections.is_empty() {
                options = options.with_collections(collections);
            }
            if !functions.is_empty() {
                options = options.with_functions(functions);
            }
            options.tenant = tenant;
            options.call_budget = call_budget;
            options.lm_provider = lm_provider;
            options.model_name = model_name;
            options.api_key = lm_api_key;
            options.description = description;

            let response = gfl.query(query, options).await?;
            Ok(serde_json::to_value(response)?)
        }
        GflCommand::Status { workflow_id } => {
            let status = gfl.status(&workflow_id).await?;
            Ok(serde_json::to_value(status)?)
        }
        GflCommand::Wait {
            workflow_id,
            interval,
            timeout,
        } => {
            let status = gfl
                .wait_for_completion(
                    &workflow_id,
                    Duration::from_secs(interval),
                    Duration::from_secs(timeout),
                )
                .await?;
            tracing::info!(%workflow_id, state = %status.status, "Workflow finished");
            Ok(serde_json::to_value(status)?)
        }
    }
}

fn write_options(args: WriteArgs) -> GflWriteOptions {
    let mut options = GflWriteOptions::new();
    if !args.uuids.is_empty() {
        options = options.with_uuids(args.uuids);
    }
    options.tenant = args.tenant;
    options.model = args.model;
    options.api_key_for_model = args.model_api_key;
    for (name, value) in args.headers {
        options = options.with_header(name, value);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use weave_core::DataType;
    use weave_core::testing::{GflCall, ScriptedGfl};

    fn gfl() -> (Arc<ScriptedGfl>, Gfl) {
        let port = Arc::new(ScriptedGfl::new());
        let gfl = Gfl::new(port.clone(), "Article");
        (port, gfl)
    }

    #[tokio::test]
    async fn test_create_returns_envelope() {
        let (port, gfl) = gfl();
        let output = execute(
            &gfl,
            GflCommand::Create {
                property: "summary".to_string(),
                data_type: DataType::Text,
                view_properties: vec!["body".to_string()],
                instruction: "Summarize".to_string(),
                write: WriteArgs {
                    tenant: Some("tenantA".to_string()),
                    headers: vec![("X-Trace".to_string(), "1".to_string())],
                    ..WriteArgs::default()
                },
            },
        )
        .await
        .unwrap();

        assert_eq!(output["workflow_id"], "wf-1");
        let GflCall::Create(request) = &port.calls()[0] else {
            panic!("expected a create call");
        };
        assert_eq!(request.tenant.as_deref(), Some("tenantA"));
        assert_eq!(request.model, "weaviate");
        assert!(request.uuids.is_none());
        assert_eq!(request.headers.as_ref().unwrap()["X-Trace"], "1");
    }

    #[tokio::test]
    async fn test_query_defaults_and_zero_budget() {
        let (port, gfl) = gfl();
        execute(
            &gfl,
            GflCommand::Query {
                query: "How many?".to_string(),
                collections: Vec::new(),
                tenant: None,
                functions: Vec::new(),
                call_budget: Some(0),
                lm_provider: None,
                model_name: None,
                lm_api_key: Some("sk-lm".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

        let GflCall::Query(request) = &port.calls()[0] else {
            panic!("expected a query call");
        };
        assert_eq!(request.collections, ["Article"]);
        assert_eq!(request.call_budget, 0);
        assert!(request.functions.is_none());
        assert_eq!(request.api_key.as_deref(), Some("sk-lm"));
    }

    #[tokio::test]
    async fn test_wait_reaches_terminal_state() {
        let (_port, gfl) = gfl();
        let started = execute(
            &gfl,
            GflCommand::Delete {
                view_properties: vec!["body".to_string()],
                instruction: "Remove spam".to_string(),
            },
        )
        .await
        .unwrap();
        let workflow_id = started["workflow_id"].as_str().unwrap().to_string();

        let status = execute(
            &gfl,
            GflCommand::Wait {
                workflow_id,
                interval: 0,
                timeout: 5,
            },
        )
        .await
        .unwrap();
        assert_eq!(status["status"], "completed");
    }

    #[tokio::test]
    async fn test_status_of_unknown_workflow() {
        let (_port, gfl) = gfl();
        let err = execute(
            &gfl,
            GflCommand::Status {
                workflow_id: "wf-404".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }
}
