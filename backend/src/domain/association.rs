//! Location consistency between a service and its staff.
//!
//! A service may only be staffed by users registered at exactly the
//! service's location. [`check_roster`] is the gate every roster write passes
//! through: it is pure, works on already-resolved candidates, and reports
//! every offender at once so an operator can fix a submission in one pass.
//!
//! The rule applies to every role alike, administrators included.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LocationId, User, UserId};

/// A user proposed for a service roster, with its location resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCandidate {
    /// Candidate user identifier.
    pub id: UserId,
    /// Name used when reporting violations.
    pub name: String,
    /// Registered location, if any.
    #[serde(default)]
    pub location_id: Option<LocationId>,
}

impl StaffCandidate {
    /// Build a candidate projection.
    pub fn new(id: UserId, name: impl Into<String>, location_id: Option<LocationId>) -> Self {
        Self {
            id,
            name: name.into(),
            location_id,
        }
    }
}

impl From<&User> for StaffCandidate {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.name().as_ref(), user.location_id())
    }
}

/// A candidate named in a [`RosterViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterOffender {
    /// Offending user identifier.
    pub id: UserId,
    /// Offending user name.
    pub name: String,
}

impl From<&StaffCandidate> for RosterOffender {
    fn from(candidate: &StaffCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
        }
    }
}

/// Candidates that break the location invariant, grouped by reason.
///
/// The two groups are disjoint and keep the submission order. At least one
/// of them is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterViolation {
    missing_location: Vec<RosterOffender>,
    location_mismatch: Vec<RosterOffender>,
}

impl RosterViolation {
    /// Candidates without a registered location.
    #[must_use]
    pub fn missing_location(&self) -> &[RosterOffender] {
        &self.missing_location
    }

    /// Candidates registered somewhere other than the service's location.
    #[must_use]
    pub fn location_mismatch(&self) -> &[RosterOffender] {
        &self.location_mismatch
    }

    /// Identifiers of every offender, missing-location group first.
    #[must_use]
    pub fn offender_ids(&self) -> Vec<UserId> {
        self.missing_location
            .iter()
            .chain(&self.location_mismatch)
            .map(|offender| offender.id)
            .collect()
    }
}

impl fmt::Display for RosterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = [
            (
                &self.missing_location,
                "the following users cannot be associated because they have no registered location",
            ),
            (
                &self.location_mismatch,
                "the following users cannot be associated because their location differs from the service's",
            ),
        ];
        let sentence = groups
            .iter()
            .filter(|(offenders, _)| !offenders.is_empty())
            .map(|(offenders, reason)| format!("{reason}: {}", join_names(offenders)))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{sentence}.")
    }
}

impl std::error::Error for RosterViolation {}

fn join_names(offenders: &[RosterOffender]) -> String {
    offenders
        .iter()
        .map(|offender| offender.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that every candidate is registered at `service_location`.
///
/// Repeated candidate ids are considered once; the first occurrence wins.
///
/// # Errors
///
/// Returns [`RosterViolation`] naming every candidate that lacks a location
/// or is registered elsewhere.
///
/// # Examples
/// ```
/// use backoffice::domain::{LocationId, StaffCandidate, UserId, check_roster};
///
/// let here = LocationId::new(1);
/// let roster = [
///     StaffCandidate::new(UserId::new(1), "Ana", Some(here)),
///     StaffCandidate::new(UserId::new(2), "Bruno", Some(LocationId::new(2))),
/// ];
/// let violation = check_roster(here, &roster).expect_err("Bruno is elsewhere");
/// assert_eq!(violation.offender_ids(), vec![UserId::new(2)]);
/// ```
pub fn check_roster(
    service_location: LocationId,
    candidates: &[StaffCandidate],
) -> Result<(), RosterViolation> {
    let mut missing_location = Vec::new();
    let mut location_mismatch = Vec::new();

    for candidate in distinct_by_id(candidates) {
        match candidate.location_id {
            None => missing_location.push(RosterOffender::from(candidate)),
            Some(location) if location != service_location => {
                location_mismatch.push(RosterOffender::from(candidate));
            }
            Some(_) => {}
        }
    }

    if missing_location.is_empty() && location_mismatch.is_empty() {
        Ok(())
    } else {
        Err(RosterViolation {
            missing_location,
            location_mismatch,
        })
    }
}

/// Candidates with repeated ids removed, keeping first occurrences in order.
pub(crate) fn distinct_by_id(candidates: &[StaffCandidate]) -> Vec<&StaffCandidate> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .iter()
        .filter(|candidate| seen.insert(candidate.id))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;

    const HERE: LocationId = LocationId::new(1);

    fn at(id: i64, name: &str, location: Option<i64>) -> StaffCandidate {
        StaffCandidate::new(UserId::new(id), name, location.map(LocationId::new))
    }

    #[fixture]
    fn mixed_roster() -> Vec<StaffCandidate> {
        vec![
            at(1, "Ana", Some(1)),
            at(2, "Bruno", Some(2)),
            at(3, "Carla", None),
            at(4, "Davi", None),
            at(5, "Eva", Some(3)),
        ]
    }

    #[rstest]
    fn accepts_roster_at_service_location() {
        let roster = [at(1, "Ana", Some(1)), at(2, "Bruno", Some(1))];
        assert_eq!(check_roster(HERE, &roster), Ok(()));
    }

    #[rstest]
    fn accepts_empty_roster() {
        assert_eq!(check_roster(HERE, &[]), Ok(()));
    }

    #[rstest]
    fn reports_location_mismatch() {
        let roster = [at(1, "Ana", Some(1)), at(2, "Bruno", Some(2))];
        let violation = check_roster(HERE, &roster).expect_err("mismatch");
        assert!(violation.missing_location().is_empty());
        assert_eq!(
            violation.location_mismatch(),
            [RosterOffender {
                id: UserId::new(2),
                name: "Bruno".to_owned()
            }]
        );
    }

    #[rstest]
    fn reports_missing_location() {
        let violation = check_roster(HERE, &[at(3, "Carla", None)]).expect_err("missing");
        assert_eq!(violation.offender_ids(), vec![UserId::new(3)]);
        assert!(violation.location_mismatch().is_empty());
    }

    #[rstest]
    fn groups_every_offender_in_submission_order(mixed_roster: Vec<StaffCandidate>) {
        let violation = check_roster(HERE, &mixed_roster).expect_err("violations");
        let missing: Vec<_> = violation.missing_location().iter().map(|o| o.id).collect();
        let mismatch: Vec<_> = violation.location_mismatch().iter().map(|o| o.id).collect();
        assert_eq!(missing, vec![UserId::new(3), UserId::new(4)]);
        assert_eq!(mismatch, vec![UserId::new(2), UserId::new(5)]);
    }

    #[rstest]
    fn message_names_both_groups(mixed_roster: Vec<StaffCandidate>) {
        let violation = check_roster(HERE, &mixed_roster).expect_err("violations");
        insta::assert_snapshot!(
            violation.to_string(),
            @"the following users cannot be associated because they have no registered location: Carla, Davi; the following users cannot be associated because their location differs from the service's: Bruno, Eva."
        );
    }

    #[rstest]
    fn message_omits_empty_group() {
        let violation = check_roster(HERE, &[at(2, "Bruno", Some(2))]).expect_err("mismatch");
        assert_eq!(
            violation.to_string(),
            "the following users cannot be associated because their location differs from the service's: Bruno."
        );
    }

    #[rstest]
    fn repeated_candidates_are_reported_once() {
        let roster = [at(3, "Carla", None), at(3, "Carla", None)];
        let violation = check_roster(HERE, &roster).expect_err("missing");
        assert_eq!(violation.missing_location().len(), 1);
    }

    #[rstest]
    fn serializes_groups_in_camel_case() {
        let violation = check_roster(HERE, &[at(3, "Carla", None)]).expect_err("missing");
        let value = serde_json::to_value(&violation).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "missingLocation": [{"id": 3, "name": "Carla"}],
                "locationMismatch": [],
            })
        );
    }
}
