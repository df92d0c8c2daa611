//! Transport and tour services offered at a location.
//!
//! A [`Service`] can only be built or re-staffed through
//! [`check_roster`](super::check_roster), so a value in hand always satisfies
//! the location invariant for the candidates it was checked against.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::association::distinct_by_id;
use super::{LocationId, RosterViolation, StaffCandidate, UserId, check_roster};

/// Maximum allowed length for a service name.
pub const SERVICE_NAME_MAX: usize = 160;

/// Numeric service identifier assigned by persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(i64);

impl ServiceId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons a service cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceValidationError {
    /// Name was blank.
    #[error("service name must not be empty")]
    EmptyName,
    /// Name exceeded [`SERVICE_NAME_MAX`] characters.
    #[error("service name must be at most {max} characters")]
    NameTooLong {
        /// Maximum character count.
        max: usize,
    },
    /// The proposed roster breaks the location invariant.
    #[error(transparent)]
    Roster(#[from] RosterViolation),
}

/// Unvalidated service fields supplied by a create flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    /// Identifier reserved for the new service.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Location the service operates in.
    pub location_id: LocationId,
}

/// A service with a roster that satisfies the location invariant.
///
/// ## Invariants
/// - `name` is non-empty once trimmed and stored trimmed.
/// - Every user in `staff_ids` was checked against `location_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    id: ServiceId,
    name: String,
    location_id: LocationId,
    staff_ids: BTreeSet<UserId>,
}

impl Service {
    /// Build a service staffed by `candidates`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceValidationError`] for an invalid name or a roster
    /// that breaks the location invariant.
    ///
    /// # Examples
    /// ```
    /// use backoffice::domain::{LocationId, Service, ServiceDraft, ServiceId, StaffCandidate, UserId};
    ///
    /// let draft = ServiceDraft {
    ///     id: ServiceId::new(10),
    ///     name: "Airport transfer".to_owned(),
    ///     location_id: LocationId::new(1),
    /// };
    /// let staff = [StaffCandidate::new(UserId::new(4), "Ana", Some(LocationId::new(1)))];
    /// let service = Service::staffed(draft, &staff).expect("roster is local");
    /// assert!(service.staff_ids().contains(&UserId::new(4)));
    /// ```
    pub fn staffed(
        draft: ServiceDraft,
        candidates: &[StaffCandidate],
    ) -> Result<Self, ServiceValidationError> {
        let name = validate_name(&draft.name)?;
        check_roster(draft.location_id, candidates)?;
        Ok(Self {
            id: draft.id,
            name,
            location_id: draft.location_id,
            staff_ids: roster_ids(candidates),
        })
    }

    /// Rehydrate a service previously persisted through [`Service::staffed`]
    /// or [`Service::reassign`].
    ///
    /// Persistence adapters are the only intended callers; the roster is
    /// trusted because it was gated before it was written.
    #[must_use]
    pub fn restore(
        id: ServiceId,
        name: String,
        location_id: LocationId,
        staff_ids: BTreeSet<UserId>,
    ) -> Self {
        Self {
            id,
            name,
            location_id,
            staff_ids,
        }
    }

    /// Return a copy operating at `location_id` with `candidates` as the
    /// complete roster. `self` is left untouched either way.
    ///
    /// # Errors
    ///
    /// Returns [`RosterViolation`] when any candidate is not registered at
    /// `location_id`.
    pub fn reassign(
        &self,
        location_id: LocationId,
        candidates: &[StaffCandidate],
    ) -> Result<Self, RosterViolation> {
        check_roster(location_id, candidates)?;
        Ok(Self {
            id: self.id,
            name: self.name.clone(),
            location_id,
            staff_ids: roster_ids(candidates),
        })
    }

    /// Return a copy staffed by `candidates` at the current location.
    ///
    /// # Errors
    ///
    /// Returns [`RosterViolation`] when any candidate is registered
    /// elsewhere or nowhere.
    pub fn restaff(&self, candidates: &[StaffCandidate]) -> Result<Self, RosterViolation> {
        self.reassign(self.location_id, candidates)
    }

    /// Return a renamed copy.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceValidationError`] for an invalid name.
    pub fn renamed(&self, name: &str) -> Result<Self, ServiceValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            ..self.clone()
        })
    }

    /// Service identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location the service operates in.
    #[must_use]
    pub const fn location_id(&self) -> LocationId {
        self.location_id
    }

    /// Users staffing the service.
    #[must_use]
    pub const fn staff_ids(&self) -> &BTreeSet<UserId> {
        &self.staff_ids
    }
}

fn validate_name(raw: &str) -> Result<String, ServiceValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceValidationError::EmptyName);
    }
    if name.chars().count() > SERVICE_NAME_MAX {
        return Err(ServiceValidationError::NameTooLong {
            max: SERVICE_NAME_MAX,
        });
    }
    Ok(name.to_owned())
}

fn roster_ids(candidates: &[StaffCandidate]) -> BTreeSet<UserId> {
    distinct_by_id(candidates)
        .into_iter()
        .map(|candidate| candidate.id)
        .collect()
}
