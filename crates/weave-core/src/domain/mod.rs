//! Domain types shared by the ports, the facades and the adapters.

pub mod agents;
pub mod gfl;
pub mod tenant;

pub use agents::{
    AggregationResultWithCollection, DependentOperationStep, OperationStep, QUERY_AGENT_LIMIT,
    QueryAgentRequest, QueryAgentResponse, QueryResultWithCollection, TransformationRequest,
    TransformationResponse,
};
pub use gfl::{
    DataType, GflDefaults, GflDeleteRequest, GflQueryOptions, GflQueryRequest, GflQueryResponse,
    GflResponse, GflStatusResponse, GflWriteOptions, GflWriteRequest, NewProperty,
    PropertyTargets, Usage, WorkflowState,
};
pub use tenant::{Tenant, TenantActivityStatus, TenantCreate, TenantRef, TenantUpdate};
