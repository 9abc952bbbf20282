//! Generative Function Layer (GFL) domain types.
//!
//! Request payloads are serialized with the field names the GFL service
//! expects. Cluster credentials are attached by the adapter, not here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::ports::{ClientError, ClientResult};

// ============================================================================
// Data Types
// ============================================================================

/// Value kind of a property, using the database's data type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "text[]")]
    TextArray,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "int[]")]
    IntArray,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "number[]")]
    NumberArray,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "boolean[]")]
    BooleanArray,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "date[]")]
    DateArray,
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "uuid[]")]
    UuidArray,
    #[serde(rename = "blob")]
    Blob,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "object[]")]
    ObjectArray,
    #[serde(rename = "geoCoordinates")]
    GeoCoordinates,
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
}

impl DataType {
    /// All data types, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Text,
        Self::TextArray,
        Self::Int,
        Self::IntArray,
        Self::Number,
        Self::NumberArray,
        Self::Boolean,
        Self::BooleanArray,
        Self::Date,
        Self::DateArray,
        Self::Uuid,
        Self::UuidArray,
        Self::Blob,
        Self::Object,
        Self::ObjectArray,
        Self::GeoCoordinates,
        Self::PhoneNumber,
    ];

    /// Wire name of the data type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArray => "text[]",
            Self::Int => "int",
            Self::IntArray => "int[]",
            Self::Number => "number",
            Self::NumberArray => "number[]",
            Self::Boolean => "boolean",
            Self::BooleanArray => "boolean[]",
            Self::Date => "date",
            Self::DateArray => "date[]",
            Self::Uuid => "uuid",
            Self::UuidArray => "uuid[]",
            Self::Blob => "blob",
            Self::Object => "object",
            Self::ObjectArray => "object[]",
            Self::GeoCoordinates => "geoCoordinates",
            Self::PhoneNumber => "phoneNumber",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|dt| dt.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClientError::validation(format!("unknown data type '{wanted}'")))
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Defaults applied to optional GFL parameters the caller leaves unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GflDefaults {
    /// Model used for create/update generation
    pub model: String,
    /// Maximum tool invocations a query agent may perform
    pub call_budget: u32,
    /// LM provider used by query agents
    pub lm_provider: String,
    /// Model name used by query agents
    pub model_name: String,
}

impl Default for GflDefaults {
    fn default() -> Self {
        Self {
            model: "weaviate".to_string(),
            call_budget: 20,
            lm_provider: "openai".to_string(),
            model_name: "gpt-4o".to_string(),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A property to be created and populated by the LM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProperty {
    /// Property name
    pub name: String,
    /// Value kind of the new property
    pub data_type: DataType,
}

/// Properties a generation request writes to.
///
/// New properties carry a data type; existing ones are named only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyTargets {
    /// Properties that do not exist yet
    New(Vec<NewProperty>),
    /// Existing properties whose values are regenerated
    Existing(Vec<String>),
}

impl PropertyTargets {
    /// Names of the targeted properties.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::New(props) => props.iter().map(|p| p.name.as_str()).collect(),
            Self::Existing(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Whether no property is targeted.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::New(props) => props.is_empty(),
            Self::Existing(names) => names.is_empty(),
        }
    }
}

/// Payload of a GFL create or update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GflWriteRequest {
    /// Restrict generation to these objects; all objects when `None`
    pub uuids: Option<Vec<Uuid>>,
    /// Target collection
    pub collection: String,
    /// Natural-language instruction for the LM
    pub instruction: String,
    /// Properties written by the call
    pub on_properties: PropertyTargets,
    /// Properties the LM may read
    pub view_properties: Vec<String>,
    /// Extra headers forwarded to the database (e.g. vectorizer keys)
    pub headers: Option<BTreeMap<String, String>>,
    /// Tenant to operate on
    pub tenant: Option<String>,
    /// Generation model
    pub model: String,
    /// API key for the generation model
    pub api_key_for_model: Option<String>,
}

impl GflWriteRequest {
    /// Check the request before it is sent.
    pub fn validate(&self) -> ClientResult<()> {
        if self.instruction.trim().is_empty() {
            return Err(ClientError::validation("instruction must not be empty"));
        }
        if self.on_properties.is_empty() {
            return Err(ClientError::validation(
                "at least one target property is required",
            ));
        }
        if self.on_properties.names().iter().any(|n| n.trim().is_empty()) {
            return Err(ClientError::validation("property names must not be empty"));
        }
        Ok(())
    }
}

/// Payload of a GFL object deletion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GflDeleteRequest {
    /// Target collection
    pub collection: String,
    /// Instruction selecting the objects to delete
    pub instruction: String,
    /// Properties the LM may read to decide
    pub view_properties: Vec<String>,
}

/// Payload of a GFL query call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GflQueryRequest {
    /// Natural-language query
    pub query: String,
    /// Collections the agent may search
    pub collections: Vec<String>,
    /// Tenant to operate on
    pub tenant: Option<String>,
    /// Tool functions the agent may call; server default set when `None`
    pub functions: Option<Vec<String>>,
    /// Maximum tool invocations; passed through unchanged, including zero
    pub call_budget: u32,
    /// LM provider
    pub lm_provider: String,
    /// Model name
    pub model_name: String,
    /// API key for the LM provider
    pub api_key: Option<String>,
    /// Free-form description of the data, given to the agent as context
    pub description: Option<String>,
}

// ============================================================================
// Call Options
// ============================================================================

/// Optional parameters of GFL create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GflWriteOptions {
    /// Restrict the call to these objects
    pub uuids: Option<Vec<Uuid>>,
    /// Extra headers forwarded to the database
    pub headers: Option<BTreeMap<String, String>>,
    /// Tenant to operate on
    pub tenant: Option<String>,
    /// Generation model; [`GflDefaults::model`] when `None`
    pub model: Option<String>,
    /// API key for the generation model
    pub api_key_for_model: Option<String>,
}

impl GflWriteOptions {
    /// Options with every parameter unset.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_uuids(mut self, uuids: impl IntoIterator<Item = Uuid>) -> Self {
        self.uuids = Some(uuids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_api_key_for_model(mut self, key: impl Into<String>) -> Self {
        self.api_key_for_model = Some(key.into());
        self
    }
}

/// Optional parameters of a GFL query call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GflQueryOptions {
    /// Collections to query; the facade's own collection when `None`
    pub collections: Option<Vec<String>>,
    pub tenant: Option<String>,
    pub functions: Option<Vec<String>>,
    /// [`GflDefaults::call_budget`] when `None`
    pub call_budget: Option<u32>,
    pub lm_provider: Option<String>,
    pub model_name: Option<String>,
    pub api_key: Option<String>,
    pub description: Option<String>,
}

impl GflQueryOptions {
    /// Options with every parameter unset.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = Some(collections.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    #[must_use]
    pub fn with_functions<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions = Some(functions.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_call_budget(mut self, budget: u32) -> Self {
        self.call_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn with_lm_provider(mut self, provider: impl Into<String>) -> Self {
        self.lm_provider = Some(provider.into());
        self
    }

    #[must_use]
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Outcome of a GFL create, update or delete call.
///
/// The service starts an asynchronous workflow; poll it with `status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GflResponse {
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub operation_name: Option<String>,
    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token accounting reported by LM-backed endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub requests: Option<u64>,
    #[serde(default)]
    pub request_tokens: Option<u64>,
    #[serde(default)]
    pub response_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
    #[serde(default)]
    pub details: Option<BTreeMap<String, u64>>,
}

/// Outcome of a GFL query call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GflQueryResponse {
    pub original_query: Option<String>,
    pub final_answer: Option<String>,
    pub collection_names: Vec<String>,
    /// Raw search results per agent step
    pub searches: Vec<Value>,
    /// Raw aggregation results per agent step
    pub aggregations: Vec<Value>,
    pub usage: Option<Usage>,
    /// Seconds spent by the agent
    pub total_time: Option<f64>,
    pub is_partial_answer: bool,
    pub missing_information: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle state of a server-side workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    /// A state this client does not know about, kept verbatim
    Unknown(String),
}

impl WorkflowState {
    /// Whether the workflow will not change state again.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Wire name of the state.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for WorkflowState {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" | "scheduled" => Self::Pending,
            "running" | "in_progress" | "started" => Self::Running,
            "completed" | "complete" | "succeeded" | "success" | "done" => Self::Completed,
            "failed" | "failure" | "error" => Self::Failed,
            "cancelled" | "canceled" | "terminated" => Self::Cancelled,
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkflowState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkflowState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Outcome of a workflow status poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GflStatusResponse {
    #[serde(default)]
    pub workflow_id: String,
    #[serde(default)]
    pub status: WorkflowState,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GflStatusResponse {
    /// Whether the polled workflow has finished.
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_type_wire_names() {
        assert_eq!(serde_json::to_value(DataType::Text).unwrap(), json!("text"));
        assert_eq!(
            serde_json::to_value(DataType::NumberArray).unwrap(),
            json!("number[]")
        );
        assert_eq!(
            serde_json::from_value::<DataType>(json!("geoCoordinates")).unwrap(),
            DataType::GeoCoordinates
        );
    }

    #[test]
    fn test_data_type_from_str() {
        assert_eq!("TEXT".parse::<DataType>().unwrap(), DataType::Text);
        assert_eq!("int[]".parse::<DataType>().unwrap(), DataType::IntArray);
        assert_eq!(
            "phonenumber".parse::<DataType>().unwrap(),
            DataType::PhoneNumber
        );
        assert!("varchar".parse::<DataType>().is_err());
    }

    #[test]
    fn test_defaults() {
        let defaults = GflDefaults::default();
        assert_eq!(defaults.model, "weaviate");
        assert_eq!(defaults.call_budget, 20);
        assert_eq!(defaults.lm_provider, "openai");
        assert_eq!(defaults.model_name, "gpt-4o");
    }

    #[test]
    fn test_property_targets_serialization() {
        let new = PropertyTargets::New(vec![NewProperty {
            name: "summary".to_string(),
            data_type: DataType::Text,
        }]);
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            json!([{"name": "summary", "data_type": "text"}])
        );

        let existing = PropertyTargets::Existing(vec!["summary".to_string()]);
        assert_eq!(serde_json::to_value(&existing).unwrap(), json!(["summary"]));
    }

    #[test]
    fn test_write_request_keeps_nulls() {
        let request = GflWriteRequest {
            uuids: None,
            collection: "Article".to_string(),
            instruction: "Summarize".to_string(),
            on_properties: PropertyTargets::Existing(vec!["summary".to_string()]),
            view_properties: vec!["body".to_string()],
            headers: None,
            tenant: None,
            model: "weaviate".to_string(),
            api_key_for_model: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value["uuids"].is_null());
        assert!(value["tenant"].is_null());
        assert_eq!(value["model"], "weaviate");
    }

    #[test]
    fn test_write_request_validation() {
        let mut request = GflWriteRequest {
            uuids: None,
            collection: "Article".to_string(),
            instruction: "  ".to_string(),
            on_properties: PropertyTargets::Existing(vec!["summary".to_string()]),
            view_properties: vec![],
            headers: None,
            tenant: None,
            model: "weaviate".to_string(),
            api_key_for_model: None,
        };
        assert!(request.validate().is_err());

        request.instruction = "Summarize".to_string();
        assert!(request.validate().is_ok());

        request.on_properties = PropertyTargets::Existing(vec![]);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_workflow_state_parsing() {
        let status: GflStatusResponse = serde_json::from_value(json!({
            "workflow_id": "wf-1",
            "status": "COMPLETED",
            "result": {"updated": 12}
        }))
        .unwrap();
        assert_eq!(status.status, WorkflowState::Completed);
        assert!(status.is_terminal());

        let status: GflStatusResponse =
            serde_json::from_value(json!({"workflow_id": "wf-2", "status": "thinking"})).unwrap();
        assert_eq!(status.status, WorkflowState::Unknown("thinking".to_string()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_query_response_keeps_unknown_fields() {
        let response: GflQueryResponse = serde_json::from_value(json!({
            "final_answer": "42 articles",
            "collection_names": ["Article"],
            "trace_id": "abc"
        }))
        .unwrap();
        assert_eq!(response.final_answer.as_deref(), Some("42 articles"));
        assert_eq!(response.extra["trace_id"], "abc");
    }
}
