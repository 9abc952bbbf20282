//! Port trait implementations for `RestClient`.
//!
//! This module implements the core-owned `TenantsPort`, `GflPort` and
//! `AgentsPort` traits, converting internal HTTP errors into `ClientError`.

use async_trait::async_trait;
use weave_core::domain::{
    GflDeleteRequest, GflQueryRequest, GflQueryResponse, GflResponse, GflStatusResponse,
    GflWriteRequest, QueryAgentRequest, QueryAgentResponse, TransformationRequest,
};
use weave_core::ports::{AgentsPort, ClientError, ClientResult, GflPort, TenantsPort};
use weave_core::{Tenant, TenantCreate, TenantUpdate};

use crate::client::RestClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpError` to core `ClientError`.
///
/// `resource` names what a 404 refers to.
fn map_error(err: HttpError, resource: &str) -> ClientError {
    match err {
        HttpError::ApiRequestFailed { status, url, body, .. } => match status {
            404 => ClientError::NotFound {
                resource: resource.to_string(),
            },
            400 | 422 => ClientError::Validation {
                message: non_empty(body, &url),
            },
            401 | 403 => ClientError::Unauthorized {
                message: non_empty(body, &url),
            },
            _ => ClientError::Api {
                status,
                message: non_empty(body, &url),
            },
        },
        HttpError::InvalidResponse { message } => ClientError::InvalidResponse { message },
        HttpError::Json(e) => ClientError::InvalidResponse {
            message: e.to_string(),
        },
        HttpError::Network(e) => ClientError::Transport {
            message: e.to_string(),
        },
        HttpError::InvalidUrl(e) => ClientError::Configuration {
            message: e.to_string(),
        },
        HttpError::InvalidBaseUrl { url } => ClientError::Configuration {
            message: format!("URL cannot be used as a base: {url}"),
        },
    }
}

fn non_empty(body: String, url: &str) -> String {
    if body.trim().is_empty() {
        format!("request to {url} was rejected")
    } else {
        body
    }
}

/// A rejected tenant update that refers to a tenant the server doesn't have.
fn is_missing_tenant(err: &HttpError) -> bool {
    match err {
        HttpError::ApiRequestFailed { status: 404, .. } => true,
        HttpError::ApiRequestFailed {
            status: 422, body, ..
        } => {
            let body = body.to_ascii_lowercase();
            body.contains("not found") || body.contains("does not exist")
        }
        _ => false,
    }
}

fn tenant_resource(collection: &str, name: &str) -> String {
    format!("tenant '{name}' of collection '{collection}'")
}

fn collection_resource(collection: &str) -> String {
    format!("collection '{collection}'")
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> TenantsPort for RestClient<B> {
    async fn list(&self, collection: &str) -> ClientResult<Vec<Tenant>> {
        self.list_tenants(collection)
            .await
            .map_err(|e| map_error(e, &collection_resource(collection)))
    }

    async fn get(&self, collection: &str, name: &str) -> ClientResult<Tenant> {
        self.get_tenant(collection, name)
            .await
            .map_err(|e| map_error(e, &tenant_resource(collection, name)))
    }

    async fn exists(&self, collection: &str, name: &str) -> ClientResult<bool> {
        self.tenant_exists(collection, name)
            .await
            .map_err(|e| map_error(e, &tenant_resource(collection, name)))
    }

    async fn create(&self, collection: &str, tenants: &[TenantCreate]) -> ClientResult<()> {
        self.create_tenants(collection, tenants)
            .await
            .map_err(|e| map_error(e, &collection_resource(collection)))
    }

    async fn update(&self, collection: &str, tenants: &[TenantUpdate]) -> ClientResult<()> {
        self.update_tenants(collection, tenants)
            .await
            .map_err(|e| {
                if is_missing_tenant(&e) {
                    let names: Vec<&str> = tenants.iter().map(|t| t.name.as_str()).collect();
                    ClientError::NotFound {
                        resource: format!(
                            "tenants [{}] of collection '{collection}'",
                            names.join(", ")
                        ),
                    }
                } else {
                    map_error(e, &collection_resource(collection))
                }
            })
    }

    async fn remove(&self, collection: &str, names: &[String]) -> ClientResult<()> {
        self.remove_tenants(collection, names)
            .await
            .map_err(|e| map_error(e, &collection_resource(collection)))
    }
}

#[async_trait]
impl<B: HttpBackend> GflPort for RestClient<B> {
    async fn create(&self, request: &GflWriteRequest) -> ClientResult<GflResponse> {
        self.gfl_create(request)
            .await
            .map_err(|e| map_error(e, &collection_resource(&request.collection)))
    }

    async fn update(&self, request: &GflWriteRequest) -> ClientResult<GflResponse> {
        self.gfl_update(request)
            .await
            .map_err(|e| map_error(e, &collection_resource(&request.collection)))
    }

    async fn delete_objects(&self, request: &GflDeleteRequest) -> ClientResult<GflResponse> {
        self.gfl_delete(request)
            .await
            .map_err(|e| map_error(e, &collection_resource(&request.collection)))
    }

    async fn query(&self, request: &GflQueryRequest) -> ClientResult<GflQueryResponse> {
        self.gfl_query(request)
            .await
            .map_err(|e| map_error(e, &format!("collections {:?}", request.collections)))
    }

    async fn status(&self, workflow_id: &str) -> ClientResult<GflStatusResponse> {
        self.gfl_status(workflow_id)
            .await
            .map_err(|e| map_error(e, &format!("workflow '{workflow_id}'")))
    }
}

#[async_trait]
impl<B: HttpBackend> AgentsPort for RestClient<B> {
    async fn run_query(&self, request: &QueryAgentRequest) -> ClientResult<QueryAgentResponse> {
        self.run_query_agent(request)
            .await
            .map_err(|e| map_error(e, &format!("collections {:?}", request.collection_names)))
    }

    async fn submit_transformation(
        &self,
        request: &TransformationRequest,
    ) -> ClientResult<String> {
        self.post_transformation(request)
            .await
            .map_err(|e| map_error(e, &collection_resource(&request.collection)))
    }
}
