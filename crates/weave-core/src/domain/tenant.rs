//! Tenant domain types.
//!
//! A tenant is a named partition of a collection's data. Names are unique
//! within a collection; the server enforces that, not this crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ports::{ClientError, ClientResult};

// ============================================================================
// Activity Status
// ============================================================================

/// Activity state of a tenant.
///
/// Serialized with the current wire names. The legacy names the server used
/// before offloading was introduced (`HOT`, `COLD`, `FROZEN`, `FREEZING`,
/// `UNFREEZING`) are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantActivityStatus {
    /// Loaded and serving reads and writes.
    #[default]
    #[serde(alias = "HOT")]
    Active,
    /// Kept on local disk but not loaded.
    #[serde(alias = "COLD")]
    Inactive,
    /// Moved to cold storage.
    #[serde(alias = "FROZEN")]
    Offloaded,
    /// Transitioning to `Offloaded`.
    #[serde(alias = "FREEZING")]
    Offloading,
    /// Transitioning back from `Offloaded`.
    #[serde(alias = "UNFREEZING")]
    Onloading,
}

impl TenantActivityStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Offloaded => "OFFLOADED",
            Self::Offloading => "OFFLOADING",
            Self::Onloading => "ONLOADING",
        }
    }

    /// Statuses a caller may request when creating a tenant.
    pub const fn is_creatable(self) -> bool {
        matches!(self, Self::Active | Self::Inactive)
    }

    /// Statuses a caller may request when updating a tenant.
    ///
    /// The transitional states are owned by the server.
    pub const fn is_updatable(self) -> bool {
        matches!(self, Self::Active | Self::Inactive | Self::Offloaded)
    }
}

impl fmt::Display for TenantActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantActivityStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" | "HOT" => Ok(Self::Active),
            "INACTIVE" | "COLD" => Ok(Self::Inactive),
            "OFFLOADED" | "FROZEN" => Ok(Self::Offloaded),
            "OFFLOADING" | "FREEZING" => Ok(Self::Offloading),
            "ONLOADING" | "UNFREEZING" => Ok(Self::Onloading),
            other => Err(ClientError::validation(format!(
                "unknown tenant activity status '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Tenant Descriptors
// ============================================================================

/// A tenant as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Tenant name, unique within its collection
    pub name: String,
    /// Current activity status
    #[serde(default)]
    pub activity_status: TenantActivityStatus,
}

impl Tenant {
    /// Create a tenant descriptor.
    pub fn new(name: impl Into<String>, activity_status: TenantActivityStatus) -> Self {
        Self {
            name: name.into(),
            activity_status,
        }
    }
}

/// A tenant to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCreate {
    /// Tenant name
    pub name: String,
    /// Initial status; the server defaults to `ACTIVE` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_status: Option<TenantActivityStatus>,
}

impl TenantCreate {
    /// A tenant with the server's default status.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activity_status: None,
        }
    }

    /// Request an explicit initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TenantActivityStatus) -> Self {
        self.activity_status = Some(status);
        self
    }

    /// Check the tenant before it is sent.
    pub fn validate(&self) -> ClientResult<()> {
        validate_name(&self.name)?;
        match self.activity_status {
            Some(status) if !status.is_creatable() => Err(ClientError::validation(format!(
                "tenant '{}' cannot be created with status {status}",
                self.name
            ))),
            _ => Ok(()),
        }
    }
}

impl From<&str> for TenantCreate {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TenantCreate {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Keeps the tenant's status only when it can be requested at creation;
/// otherwise the server default applies.
impl From<Tenant> for TenantCreate {
    fn from(tenant: Tenant) -> Self {
        let status = tenant.activity_status;
        Self {
            name: tenant.name,
            activity_status: status.is_creatable().then_some(status),
        }
    }
}

/// A status change for an existing tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUpdate {
    /// Name of the tenant to update
    pub name: String,
    /// Desired status
    pub activity_status: TenantActivityStatus,
}

impl TenantUpdate {
    /// Create a status change.
    pub fn new(name: impl Into<String>, activity_status: TenantActivityStatus) -> Self {
        Self {
            name: name.into(),
            activity_status,
        }
    }

    /// Check the tenant before it is sent.
    pub fn validate(&self) -> ClientResult<()> {
        validate_name(&self.name)?;
        if self.activity_status.is_updatable() {
            Ok(())
        } else {
            Err(ClientError::validation(format!(
                "tenant '{}' cannot be moved to transitional status {}",
                self.name, self.activity_status
            )))
        }
    }
}

impl From<Tenant> for TenantUpdate {
    fn from(tenant: Tenant) -> Self {
        Self {
            name: tenant.name,
            activity_status: tenant.activity_status,
        }
    }
}

// ============================================================================
// Tenant References
// ============================================================================

/// Anything that names a tenant: a plain string or a tenant descriptor.
///
/// Lets `remove`, `exists` and the lookups accept names and tenant objects
/// interchangeably.
pub trait TenantRef {
    /// The referenced tenant's name.
    fn tenant_name(&self) -> &str;
}

impl TenantRef for str {
    fn tenant_name(&self) -> &str {
        self
    }
}

impl TenantRef for String {
    fn tenant_name(&self) -> &str {
        self
    }
}

impl TenantRef for Tenant {
    fn tenant_name(&self) -> &str {
        &self.name
    }
}

impl TenantRef for TenantCreate {
    fn tenant_name(&self) -> &str {
        &self.name
    }
}

impl TenantRef for TenantUpdate {
    fn tenant_name(&self) -> &str {
        &self.name
    }
}

impl<T: TenantRef + ?Sized> TenantRef for &T {
    fn tenant_name(&self) -> &str {
        (**self).tenant_name()
    }
}

/// Reject names the server would refuse anyway.
pub fn validate_name(name: &str) -> ClientResult<()> {
    if name.trim().is_empty() {
        return Err(ClientError::validation("tenant name must not be empty"));
    }
    Ok(())
}
