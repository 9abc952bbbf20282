//! Agent command handlers.

use serde_json::Value;
use weave_core::{OperationStep, QueryAgent, TransformationAgent};

use crate::bootstrap::CliContext;
use crate::commands::AgentCommand;
use crate::error::CliError;

/// Execute an agent subcommand.
pub async fn execute(ctx: &CliContext, command: AgentCommand) -> Result<Value, CliError> {
    match command {
        AgentCommand::Query {
            query,
            collections,
            tenant,
            view_properties,
        } => {
            let mut agent = ctx.query_agent(collections);
            if let Some(tenant) = tenant {
                agent = agent.with_tenant(tenant);
            }
            run_query(&agent, query, view_properties).await
        }
        AgentCommand::Transform {
            collection,
            property,
            view_properties,
            instruction,
            data_type,
        } => {
            let step = match data_type {
                Some(data_type) => {
                    OperationStep::append(property, data_type, view_properties, instruction)
                }
                None => OperationStep::update(property, view_properties, instruction),
            };
            run_transformation(&ctx.transformation_agent(&collection, step)).await
        }
    }
}

async fn run_query(
    agent: &QueryAgent,
    query: String,
    view_properties: Vec<String>,
) -> Result<Value, CliError> {
    let view_properties = (!view_properties.is_empty()).then_some(view_properties);
    let response = agent.run(query, view_properties, None).await?;
    Ok(serde_json::to_value(response)?)
}

async fn run_transformation(agent: &TransformationAgent) -> Result<Value, CliError> {
    let responses = agent.update_all().await?;
    Ok(serde_json::to_value(responses)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use weave_core::DataType;
    use weave_core::testing::RecordingAgents;

    #[tokio::test]
    async fn test_query_without_view_sends_none() {
        let port = Arc::new(RecordingAgents::new());
        let agent = QueryAgent::new(port.clone(), ["Article"]).with_tenant("tenantA");

        let output = run_query(&agent, "What is trending?".to_string(), Vec::new())
            .await
            .unwrap();
        assert_eq!(output["final_answer"], "answer to: What is trending?");

        let sent = &port.queries()[0];
        assert!(sent.collection_view_properties.is_none());
        assert_eq!(sent.tenant.as_deref(), Some("tenantA"));
    }

    #[tokio::test]
    async fn test_empty_query_is_argument_error() {
        let port = Arc::new(RecordingAgents::new());
        let agent = QueryAgent::new(port.clone(), ["Article"]);

        let err = run_query(&agent, " ".to_string(), Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(port.queries().is_empty());
    }

    #[tokio::test]
    async fn test_transformation_returns_workflows() {
        let port = Arc::new(RecordingAgents::new());
        let agent = TransformationAgent::configure(
            port.clone(),
            "Article",
            [OperationStep::append(
                "summary",
                DataType::Text,
                ["body"],
                "Summarize",
            )],
        );

        let output = run_transformation(&agent).await.unwrap();
        assert_eq!(
            output,
            serde_json::json!([{"operation_name": "summary", "workflow_id": "tf-1"}])
        );
        assert!(port.transformations()[0].is_append());
    }
}
