//! Agent domain types: the query agent and the transformation agent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::gfl::{DataType, NewProperty, PropertyTargets, Usage};
use crate::ports::{ClientError, ClientResult};

/// Result limit the query agent applies per search.
pub const QUERY_AGENT_LIMIT: u32 = 20;

// ============================================================================
// Query Agent
// ============================================================================

/// Payload of a query agent run.
///
/// Forwarded database headers are attached by the adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAgentRequest {
    pub query: String,
    pub collection_names: Vec<String>,
    /// Properties the agent may view; all when `None`
    pub collection_view_properties: Option<Vec<String>>,
    pub limit: u32,
    pub tenant: Option<String>,
    /// A previous answer to continue the conversation from
    pub previous_response: Option<QueryAgentResponse>,
}

/// A search result attributed to the collection it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResultWithCollection {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub queries: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An aggregation attributed to the collection it ran against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResultWithCollection {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub groupby_property: Option<String>,
    #[serde(default)]
    pub aggregations: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Answer of a query agent run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAgentResponse {
    pub original_query: String,
    pub collection_names: Vec<String>,
    pub searches: Vec<Vec<QueryResultWithCollection>>,
    pub aggregations: Vec<Vec<AggregationResultWithCollection>>,
    pub usage: Usage,
    pub total_time: f64,
    pub search_answer: Option<String>,
    pub aggregation_answer: Option<String>,
    pub has_aggregation_answer: bool,
    pub has_search_answer: bool,
    pub is_partial_answer: bool,
    pub missing_information: Vec<String>,
    pub final_answer: String,
}

// ============================================================================
// Transformation Agent
// ============================================================================

/// One transformation applied to every object of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStep {
    /// Add a new property generated from the viewed ones.
    AppendProperty {
        property_name: String,
        view_properties: Vec<String>,
        instruction: String,
        data_type: DataType,
    },
    /// Regenerate an existing property.
    UpdateProperty {
        property_name: String,
        view_properties: Vec<String>,
        instruction: String,
    },
}

impl OperationStep {
    /// Build an append step.
    pub fn append<I, S>(
        property_name: impl Into<String>,
        data_type: DataType,
        view_properties: I,
        instruction: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AppendProperty {
            property_name: property_name.into(),
            view_properties: view_properties.into_iter().map(Into::into).collect(),
            instruction: instruction.into(),
            data_type,
        }
    }

    /// Build an update step.
    pub fn update<I, S>(
        property_name: impl Into<String>,
        view_properties: I,
        instruction: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UpdateProperty {
            property_name: property_name.into(),
            view_properties: view_properties.into_iter().map(Into::into).collect(),
            instruction: instruction.into(),
        }
    }

    /// Name of the property this step writes.
    pub fn property_name(&self) -> &str {
        match self {
            Self::AppendProperty { property_name, .. }
            | Self::UpdateProperty { property_name, .. } => property_name,
        }
    }

    /// Build the request payload for this step against `collection`.
    pub fn to_request(&self, collection: &str) -> ClientResult<TransformationRequest> {
        let (view_properties, instruction, on_properties) = match self {
            Self::AppendProperty {
                property_name,
                view_properties,
                instruction,
                data_type,
            } => (
                view_properties,
                instruction,
                PropertyTargets::New(vec![NewProperty {
                    name: property_name.clone(),
                    data_type: *data_type,
                }]),
            ),
            Self::UpdateProperty {
                property_name,
                view_properties,
                instruction,
            } => (
                view_properties,
                instruction,
                PropertyTargets::Existing(vec![property_name.clone()]),
            ),
        };

        if self.property_name().trim().is_empty() {
            return Err(ClientError::validation("property name must not be empty"));
        }
        if instruction.trim().is_empty() {
            return Err(ClientError::validation(format!(
                "instruction for '{}' must not be empty",
                self.property_name()
            )));
        }

        Ok(TransformationRequest {
            instruction: instruction.clone(),
            view_properties: view_properties.clone(),
            collection: collection.to_string(),
            on_properties,
        })
    }
}

/// An operation with the operations it depends on.
///
/// Dependencies are informational: steps run in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentOperationStep {
    pub operation: OperationStep,
    pub depends_on: Vec<OperationStep>,
}

impl DependentOperationStep {
    pub const fn new(operation: OperationStep, depends_on: Vec<OperationStep>) -> Self {
        Self {
            operation,
            depends_on,
        }
    }
}

impl From<OperationStep> for DependentOperationStep {
    fn from(operation: OperationStep) -> Self {
        Self::new(operation, Vec::new())
    }
}

/// Payload sent for one transformation step.
///
/// Append steps target new properties, update steps existing ones; the
/// adapter routes on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformationRequest {
    pub instruction: String,
    pub view_properties: Vec<String>,
    pub collection: String,
    pub on_properties: PropertyTargets,
}

impl TransformationRequest {
    /// Whether the request creates a new property.
    pub const fn is_append(&self) -> bool {
        matches!(self.on_properties, PropertyTargets::New(_))
    }
}

/// Outcome of one transformation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationResponse {
    pub operation_name: String,
    pub workflow_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_step_request() {
        let step = OperationStep::append(
            "summary",
            DataType::Text,
            ["title", "body"],
            "Summarize the article",
        );
        let request = step.to_request("Article").unwrap();
        assert!(request.is_append());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "instruction": "Summarize the article",
                "view_properties": ["title", "body"],
                "collection": "Article",
                "on_properties": [{"name": "summary", "data_type": "text"}]
            })
        );
    }

    #[test]
    fn test_update_step_request() {
        let step = OperationStep::update("title", ["title"], "Title-case the title");
        let request = step.to_request("Article").unwrap();
        assert!(!request.is_append());
        assert_eq!(request.on_properties, PropertyTargets::Existing(vec!["title".into()]));
    }

    #[test]
    fn test_step_validation() {
        let step = OperationStep::update("title", ["title"], "");
        assert!(step.to_request("Article").is_err());

        let step = OperationStep::update("", ["title"], "Fix it");
        assert!(step.to_request("Article").is_err());
    }

    #[test]
    fn test_query_agent_response_tolerates_missing_fields() {
        let response: QueryAgentResponse = serde_json::from_value(json!({
            "original_query": "How many articles?",
            "final_answer": "Twelve",
            "searches": [[{"collection": "Article", "queries": ["articles"], "limit": 5}]]
        }))
        .unwrap();
        assert_eq!(response.final_answer, "Twelve");
        assert_eq!(response.searches[0][0].collection, "Article");
        assert_eq!(response.searches[0][0].extra["limit"], 5);
        assert!(!response.is_partial_answer);
    }
}
