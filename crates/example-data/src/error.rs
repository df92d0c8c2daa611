//! Error types for the example-data crate.
//!
//! Registry parsing and marketplace generation fail in different ways, so
//! each gets its own `thiserror` enum.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry lists no locations to place users and services in.
    #[error("registry contains no locations")]
    EmptyLocations,

    /// A location entry failed validation.
    #[error("invalid location at index {index}: {message}")]
    InvalidLocation {
        /// Index of the entry in the array.
        index: usize,
        /// Validation message.
        message: String,
    },

    /// Two location entries name the same city and state.
    #[error("location at index {index} duplicates an earlier entry")]
    DuplicateLocation {
        /// Index of the repeated entry.
        index: usize,
    },

    /// The registry lists no service names.
    #[error("registry contains no service names")]
    EmptyServiceNames,

    /// The first month is not a `YYYY-MM` value.
    #[error("invalid first month '{value}'")]
    InvalidFirstMonth {
        /// Rejected value.
        value: String,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// A seed spreads payments over zero months.
    #[error("seed '{name}' must cover at least one month")]
    EmptyPaymentWindow {
        /// Offending seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur while generating a marketplace.
///
/// Generated values go through the back-office constructors, so these only
/// surface when a registry drives them outside their accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A generated user was rejected.
    #[error("generated user {index} is invalid: {message}")]
    InvalidUser {
        /// Position of the user in the dataset.
        index: usize,
        /// Validation message.
        message: String,
    },

    /// A generated service was rejected.
    #[error("generated service {index} is invalid: {message}")]
    InvalidService {
        /// Position of the service in the dataset.
        index: usize,
        /// Validation message.
        message: String,
    },

    /// A generated payment was rejected.
    #[error("generated payment {index} is invalid: {message}")]
    InvalidPayment {
        /// Position of the payment in the dataset.
        index: usize,
        /// Validation message.
        message: String,
    },

    /// The payment window does not fit in the calendar.
    #[error("payment window of {months} months starting {first_month} is out of range")]
    WindowOutOfRange {
        /// First month of the window.
        first_month: String,
        /// Window length.
        months: u32,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        RegistryError::IoError {
            path: PathBuf::from("/tmp/seeds.json"),
            message: "file not found".to_owned(),
        },
        "failed to read registry file at '/tmp/seeds.json': file not found"
    )]
    #[case(
        RegistryError::UnsupportedVersion { expected: 1, actual: 2 },
        "unsupported registry version: expected 1, found 2"
    )]
    #[case(
        RegistryError::InvalidLocation { index: 2, message: "city must not be empty".to_owned() },
        "invalid location at index 2: city must not be empty"
    )]
    #[case(
        RegistryError::DuplicateLocation { index: 3 },
        "location at index 3 duplicates an earlier entry"
    )]
    #[case(
        RegistryError::SeedNotFound { name: "praia-azul".to_owned() },
        "seed 'praia-azul' not found in registry"
    )]
    fn registry_errors_format(#[case] err: RegistryError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn generation_error_window_formats_correctly() {
        let err = GenerationError::WindowOutOfRange {
            first_month: "9999-12".to_owned(),
            months: 3,
        };
        assert_eq!(
            err.to_string(),
            "payment window of 3 months starting 9999-12 is out of range"
        );
    }
}
