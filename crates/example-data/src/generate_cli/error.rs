//! Error types for the dataset generation CLI.

use thiserror::Error;

use crate::error::{GenerationError, RegistryError};

/// Errors surfaced by argument parsing and dataset generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Registry path was not supplied.
    #[error("missing required flag: --registry")]
    MissingRegistryPath,
    /// Seed name was not supplied.
    #[error("missing required flag: --seed")]
    MissingSeedName,
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// The registry could not be loaded or lacks the seed.
    #[error("registry error: {source}")]
    Registry {
        /// Underlying registry error.
        #[from]
        source: RegistryError,
    },
    /// The marketplace could not be generated.
    #[error("generation error: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        source: GenerationError,
    },
    /// The dataset could not be serialised.
    #[error("failed to render dataset: {message}")]
    Render {
        /// Serializer message.
        message: String,
    },
}
