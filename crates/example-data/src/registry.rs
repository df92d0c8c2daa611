//! Seed registry types and JSON parsing.
//!
//! The registry lists the locations and service names every generated
//! marketplace draws from, the first month payments may fall in, and the
//! named seeds that fix the RNG and the dataset size.

use std::path::Path;

use backoffice::domain::{Location, LocationId, MonthKey};
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing shared vocabulary and named seeds.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "firstMonth": "2025-01",
///     "locations": [{"city": "Recife", "state": "PE"}],
///     "serviceNames": ["Airport transfer"],
///     "seeds": [{"name": "test", "seed": 42, "userCount": 5, "serviceCount": 1,
///                "paymentCount": 10, "months": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.locations()[0].city(), "Recife");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    first_month: MonthKey,
    locations: Vec<Location>,
    service_names: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or misses required fields
    /// - The version is unsupported
    /// - A location is blank or repeats an earlier one
    /// - The location, service name or seed list is empty
    /// - A seed covers zero months
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let io_error = |message: String| RegistryError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("registry path must name a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(Path::new(file_name))
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let first_month =
            raw.first_month
                .parse::<MonthKey>()
                .map_err(|_| RegistryError::InvalidFirstMonth {
                    value: raw.first_month.clone(),
                })?;

        let locations = parse_locations(raw.locations)?;

        let service_names: Vec<String> = raw
            .service_names
            .into_iter()
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect();
        if service_names.is_empty() {
            return Err(RegistryError::EmptyServiceNames);
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }
        if let Some(empty) = raw.seeds.iter().find(|s| s.months == 0) {
            return Err(RegistryError::EmptyPaymentWindow {
                name: empty.name.clone(),
            });
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                user_count: s.user_count,
                service_count: s.service_count,
                payment_count: s.payment_count,
                months: s.months,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            first_month,
            locations,
            service_names,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the first month payments may be created in.
    #[must_use]
    pub const fn first_month(&self) -> MonthKey {
        self.first_month
    }

    /// Returns the locations, numbered from 1 in registry order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns the service names to draw from.
    #[must_use]
    pub fn service_names(&self) -> &[String] {
        &self.service_names
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn parse_locations(raw: Vec<RawLocation>) -> Result<Vec<Location>, RegistryError> {
    if raw.is_empty() {
        return Err(RegistryError::EmptyLocations);
    }
    let mut locations: Vec<Location> = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let id = i64::try_from(index)
            .ok()
            .and_then(|position| position.checked_add(1))
            .map(LocationId::new)
            .ok_or(RegistryError::InvalidLocation {
                index,
                message: "too many locations".to_owned(),
            })?;
        let location = Location::new(id, &entry.city, &entry.state).map_err(|e| {
            RegistryError::InvalidLocation {
                index,
                message: e.to_string(),
            }
        })?;
        if locations.iter().any(|known| known.same_place(&location)) {
            return Err(RegistryError::DuplicateLocation { index });
        }
        locations.push(location);
    }
    Ok(locations)
}

/// A named seed definition for deterministic marketplace generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    service_count: usize,
    payment_count: usize,
    months: u32,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of users to generate.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }

    /// Returns the number of services to generate.
    #[must_use]
    pub const fn service_count(&self) -> usize {
        self.service_count
    }

    /// Returns the number of payments to generate.
    #[must_use]
    pub const fn payment_count(&self) -> usize {
        self.payment_count
    }

    /// Returns how many months, from the registry's first month, payments
    /// are spread over.
    #[must_use]
    pub const fn months(&self) -> u32 {
        self.months
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    first_month: String,
    locations: Vec<RawLocation>,
    service_names: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    city: String,
    state: String,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    service_count: usize,
    payment_count: usize,
    months: u32,
}
