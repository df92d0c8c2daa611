//! Driving port for creating and editing staffed services.
//!
//! Inbound adapters call [`ServiceRosterCommand`] with raw ids. The
//! implementation resolves staff, enforces the location invariant and only
//! then persists, so no adapter can write a roster that skips the check.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, LocationId, Service, ServiceDraft, ServiceId, UserId};

/// Request to create a service with its initial roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    /// Identifier reserved for the new service.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Location the service operates in.
    pub location_id: LocationId,
    /// Users proposed as staff.
    #[serde(default)]
    pub staff_ids: Vec<UserId>,
}

/// Request to edit an existing service.
///
/// Absent fields keep their stored value. `staff_ids`, when present,
/// replaces the whole roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    /// Service to edit.
    pub id: ServiceId,
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    /// Complete replacement roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_ids: Option<Vec<UserId>>,
}

impl UpdateServiceRequest {
    /// Whether applying the request can change who staffs where.
    #[must_use]
    pub const fn touches_roster(&self) -> bool {
        self.location_id.is_some() || self.staff_ids.is_some()
    }
}

/// Driving port for service roster writes.
///
/// # Errors
///
/// Implementations return [`DomainError`] with code:
/// - `invalid_request` for a bad name, unknown staff ids, a roster that
///   breaks the location invariant (details list the offenders) or a create
///   whose id is already taken;
/// - `not_found` when updating a service that does not exist;
/// - `service_unavailable` or `internal_error` for adapter failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRosterCommand: Send + Sync {
    /// Create a staffed service.
    async fn create_service(&self, request: CreateServiceRequest) -> Result<Service, DomainError>;

    /// Apply a partial edit to a service.
    async fn update_service(&self, request: UpdateServiceRequest) -> Result<Service, DomainError>;
}

/// Fixture implementation for adapters that need a command without storage.
///
/// Creation only accepts an empty roster, since no staff can be resolved;
/// updates always report the service as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureServiceRosterCommand;

#[async_trait]
impl ServiceRosterCommand for FixtureServiceRosterCommand {
    async fn create_service(&self, request: CreateServiceRequest) -> Result<Service, DomainError> {
        if !request.staff_ids.is_empty() {
            return Err(DomainError::invalid_request("fixture command cannot resolve staff"));
        }
        let draft = ServiceDraft {
            id: request.id,
            name: request.name,
            location_id: request.location_id,
        };
        Service::staffed(draft, &[]).map_err(|err| DomainError::invalid_request(err.to_string()))
    }

    async fn update_service(&self, request: UpdateServiceRequest) -> Result<Service, DomainError> {
        Err(DomainError::not_found(format!("service {} not found", request.id)))
    }
}
