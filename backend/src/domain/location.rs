//! Registered locations shared by users and services.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Location::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationValidationError {
    /// City was blank.
    #[error("location city must not be empty")]
    EmptyCity,
    /// State was blank.
    #[error("location state must not be empty")]
    EmptyState,
}

/// Numeric location identifier assigned by persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
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

impl From<i64> for LocationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A city within a state.
///
/// ## Invariants
/// - `city` and `state` are non-empty once trimmed; both are stored trimmed.
/// - Two locations denote the same place when [`Location::same_place`]
///   holds; persistence keeps `(city, state)` unique on that basis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    id: LocationId,
    city: String,
    state: String,
}

impl Location {
    /// Validate and build a location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationValidationError`] when either name is blank.
    ///
    /// # Examples
    /// ```
    /// use backoffice::domain::{Location, LocationId};
    ///
    /// let location = Location::new(LocationId::new(1), " Recife ", "PE").expect("valid");
    /// assert_eq!(location.city(), "Recife");
    /// ```
    pub fn new(
        id: LocationId,
        city: impl AsRef<str>,
        state: impl AsRef<str>,
    ) -> Result<Self, LocationValidationError> {
        let city = city.as_ref().trim();
        if city.is_empty() {
            return Err(LocationValidationError::EmptyCity);
        }
        let state = state.as_ref().trim();
        if state.is_empty() {
            return Err(LocationValidationError::EmptyState);
        }
        Ok(Self {
            id,
            city: city.to_owned(),
            state: state.to_owned(),
        })
    }

    /// Location identifier.
    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// City name.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State name or abbreviation.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Whether both locations name the same city and state, ignoring case.
    #[must_use]
    pub fn same_place(&self, other: &Self) -> bool {
        self.city.to_lowercase() == other.city.to_lowercase()
            && self.state.to_lowercase() == other.state.to_lowercase()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.city, self.state)
    }
}
