//! Integration tests for the public domain types.
//!
//! Checks that the re-exported types decode the payloads the services send.

use serde_json::json;
use weave_core::{
    DataType, GflDefaults, GflStatusResponse, OperationStep, Tenant, TenantActivityStatus,
    TenantCreate, WorkflowState,
};

#[test]
fn test_tenant_list_payload() {
    let tenants: Vec<Tenant> = serde_json::from_value(json!([
        {"name": "tenantA", "activityStatus": "ACTIVE"},
        {"name": "tenantB", "activityStatus": "HOT"},
        {"name": "tenantC", "activityStatus": "OFFLOADED"}
    ]))
    .unwrap();

    assert_eq!(tenants.len(), 3);
    assert_eq!(tenants[1].activity_status, TenantActivityStatus::Active);
    assert_eq!(tenants[2].activity_status, TenantActivityStatus::Offloaded);
}

#[test]
fn test_tenant_create_from_descriptor_keeps_status() {
    let create = TenantCreate::from(Tenant::new("t", TenantActivityStatus::Inactive));
    assert_eq!(create.activity_status, Some(TenantActivityStatus::Inactive));
    assert!(create.validate().is_ok());
}

#[test]
fn test_status_payload_with_timestamps() {
    let status: GflStatusResponse = serde_json::from_value(json!({
        "workflow_id": "wf-9",
        "status": "running",
        "created_at": "2026-10-19T08:00:00Z",
        "updated_at": "2026-10-19T08:00:05Z"
    }))
    .unwrap();

    assert_eq!(status.status, WorkflowState::Running);
    assert!(!status.is_terminal());
    assert!(status.updated_at > status.created_at);
}

#[test]
fn test_defaults_and_steps_are_public() {
    assert_eq!(GflDefaults::default().call_budget, 20);

    let step = OperationStep::append("summary", DataType::Text, ["body"], "Summarize");
    assert_eq!(step.property_name(), "summary");
}
