//! URL construction helpers for the cluster, GFL and agents services.
//!
//! Path segments are appended with `path_segments_mut`, so collection and
//! tenant names are percent-encoded and never reinterpreted as paths.

use url::Url;

use crate::error::{HttpError, HttpResult};
use crate::models::ConnectionConfig;

/// Append path segments to a base URL, keeping any path the base already has.
fn with_segments(base: &Url, segments: &[&str]) -> HttpResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HttpError::InvalidBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `{cluster}/v1/schema/{collection}/tenants`
pub fn tenants_url(config: &ConnectionConfig, collection: &str) -> HttpResult<Url> {
    with_segments(
        &config.cluster_url,
        &["v1", "schema", collection, "tenants"],
    )
}

/// `{cluster}/v1/schema/{collection}/tenants/{name}`
pub fn tenant_url(config: &ConnectionConfig, collection: &str, name: &str) -> HttpResult<Url> {
    with_segments(
        &config.cluster_url,
        &["v1", "schema", collection, "tenants", name],
    )
}

/// `{gfl_host}/gfls/{action}`
pub fn gfl_url(config: &ConnectionConfig, action: &str) -> HttpResult<Url> {
    with_segments(&config.gfl_host, &["gfls", action])
}

/// `{gfl_host}/gfls/status/{workflow_id}`
pub fn gfl_status_url(config: &ConnectionConfig, workflow_id: &str) -> HttpResult<Url> {
    with_segments(&config.gfl_host, &["gfls", "status", workflow_id])
}

/// `{agents_host}/{path...}`, e.g. `agent/query` or `transformation/create`.
pub fn agents_url(config: &ConnectionConfig, path: &[&str]) -> HttpResult<Url> {
    with_segments(&config.agents_host, path)
}
