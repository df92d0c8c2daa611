//! Service roster domain service.
//!
//! Implements [`ServiceRosterCommand`]: every roster write resolves staff
//! through the [`StaffDirectory`], passes the association check and only then
//! reaches [`ServiceRepository::save`]. Creation never overwrites an existing
//! service. A rejected request leaves storage untouched.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::association::distinct_by_id;
use crate::domain::ports::{
    CreateServiceRequest, ServiceRepository, ServiceRepositoryError, ServiceRosterCommand,
    StaffDirectory, StaffDirectoryError, UpdateServiceRequest,
};
use crate::domain::{
    DomainError, LocationId, RosterViolation, Service, ServiceDraft, ServiceId, ServiceValidationError,
    StaffCandidate, UserId,
};

fn map_repository_error(error: ServiceRepositoryError) -> DomainError {
    match error {
        ServiceRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("service repository unavailable: {message}"))
        }
        ServiceRepositoryError::Query { message } => {
            DomainError::internal(format!("service repository error: {message}"))
        }
    }
}

fn map_directory_error(error: StaffDirectoryError) -> DomainError {
    match error {
        StaffDirectoryError::Connection { message } => {
            DomainError::service_unavailable(format!("staff directory unavailable: {message}"))
        }
        StaffDirectoryError::Query { message } => {
            DomainError::internal(format!("staff directory error: {message}"))
        }
    }
}

fn roster_violation_error(service_id: ServiceId, violation: &RosterViolation) -> DomainError {
    warn!(
        service_id = %service_id,
        missing_location = violation.missing_location().len(),
        location_mismatch = violation.location_mismatch().len(),
        "roster rejected by location check"
    );
    DomainError::invalid_request(violation.to_string()).with_details(json!({
        "missingLocation": violation.missing_location(),
        "locationMismatch": violation.location_mismatch(),
    }))
}

fn map_validation_error(service_id: ServiceId, error: ServiceValidationError) -> DomainError {
    match error {
        ServiceValidationError::Roster(violation) => roster_violation_error(service_id, &violation),
        other => DomainError::invalid_request(format!("invalid service: {other}")),
    }
}

/// Service roster service implementing the command driving port.
#[derive(Clone)]
pub struct ServiceRosterService<D, R> {
    staff_directory: Arc<D>,
    service_repo: Arc<R>,
}

impl<D, R> ServiceRosterService<D, R> {
    /// Create a new service with the staff directory and service repository.
    pub const fn new(staff_directory: Arc<D>, service_repo: Arc<R>) -> Self {
        Self {
            staff_directory,
            service_repo,
        }
    }
}

impl<D, R> ServiceRosterService<D, R>
where
    D: StaffDirectory,
    R: ServiceRepository,
{
    /// Resolve `ids` into candidates in request order, rejecting unknown ids.
    async fn resolve_staff(&self, ids: &[UserId]) -> Result<Vec<StaffCandidate>, DomainError> {
        let mut requested: Vec<UserId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !requested.contains(id) {
                requested.push(*id);
            }
        }
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let found = self
            .staff_directory
            .find_candidates(&requested)
            .await
            .map_err(map_directory_error)?;
        let mut by_id: HashMap<UserId, StaffCandidate> = distinct_by_id(&found)
            .into_iter()
            .map(|candidate| (candidate.id, candidate.clone()))
            .collect();

        let mut candidates = Vec::with_capacity(requested.len());
        let mut unknown = Vec::new();
        for id in requested {
            match by_id.remove(&id) {
                Some(candidate) => candidates.push(candidate),
                None => unknown.push(id),
            }
        }

        if unknown.is_empty() {
            Ok(candidates)
        } else {
            let listed = unknown
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(
                DomainError::invalid_request(format!("unknown staff users: {listed}"))
                    .with_details(json!({ "unknownStaffIds": unknown })),
            )
        }
    }

    async fn find_existing(&self, id: ServiceId) -> Result<Service, DomainError> {
        self.service_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("service {id} not found")))
    }

    async fn ensure_absent(&self, id: ServiceId) -> Result<(), DomainError> {
        let existing = self
            .service_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?;
        match existing {
            Some(_) => {
                warn!(service_id = %id, "create rejected for an existing service");
                Err(DomainError::invalid_request(format!("service {id} already exists"))
                    .with_details(json!({ "serviceId": id })))
            }
            None => Ok(()),
        }
    }

    async fn persist(&self, service: &Service) -> Result<(), DomainError> {
        self.service_repo
            .save(service)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<D, R> ServiceRosterCommand for ServiceRosterService<D, R>
where
    D: StaffDirectory,
    R: ServiceRepository,
{
    async fn create_service(&self, request: CreateServiceRequest) -> Result<Service, DomainError> {
        self.ensure_absent(request.id).await?;
        let candidates = self.resolve_staff(&request.staff_ids).await?;
        let draft = ServiceDraft {
            id: request.id,
            name: request.name,
            location_id: request.location_id,
        };
        let service = Service::staffed(draft, &candidates)
            .map_err(|err| map_validation_error(request.id, err))?;

        self.persist(&service).await?;
        debug!(
            service_id = %service.id(),
            location_id = %service.location_id(),
            staff = service.staff_ids().len(),
            "service created"
        );
        Ok(service)
    }

    async fn update_service(&self, request: UpdateServiceRequest) -> Result<Service, DomainError> {
        let existing = self.find_existing(request.id).await?;

        let mut updated = match request.name.as_deref() {
            Some(name) => existing
                .renamed(name)
                .map_err(|err| map_validation_error(request.id, err))?,
            None => existing.clone(),
        };

        if request.touches_roster() {
            let current_location = existing.location_id();
            let location: LocationId = request.location_id.unwrap_or(current_location);
            let staff_ids: Vec<UserId> = request
                .staff_ids
                .clone()
                .unwrap_or_else(|| existing.staff_ids().iter().copied().collect());
            let candidates = self.resolve_staff(&staff_ids).await?;
            updated = updated
                .reassign(location, &candidates)
                .map_err(|violation| roster_violation_error(request.id, &violation))?;
        }

        if updated == existing {
            debug!(service_id = %request.id, "service update changed nothing");
            return Ok(existing);
        }

        self.persist(&updated).await?;
        debug!(
            service_id = %updated.id(),
            location_id = %updated.location_id(),
            staff = updated.staff_ids().len(),
            "service updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "service_roster_service_tests.rs"]
mod tests;
