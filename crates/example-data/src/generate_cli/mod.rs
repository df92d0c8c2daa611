//! CLI support for printing a generated marketplace.
//!
//! The binary delegates to these functions so they can be exercised in tests
//! without spawning a subprocess.

use std::path::{Path, PathBuf};

mod error;

pub use error::CliError;

use crate::generator::generate_marketplace;
use crate::registry::SeedRegistry;
use crate::seed::ExampleMarketplace;

/// Parsed options for the generation CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    registry_path: PathBuf,
    seed_name: String,
    compact: bool,
}

impl Options {
    /// Returns the registry path to read.
    #[must_use]
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Returns the name of the seed to generate.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        &self.seed_name
    }

    /// Whether output is a single JSON line.
    #[must_use]
    pub const fn compact(&self) -> bool {
        self.compact
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments.
///
/// # Errors
///
/// Returns [`CliError`] when a required flag is missing, a flag has no
/// value, or an argument is not recognised.
///
/// # Example
///
/// ```
/// use example_data::generate_cli::{ParseOutcome, parse_args};
///
/// let args = ["--registry", "seeds.json", "--seed", "praia-azul"].map(String::from);
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
/// assert_eq!(options.seed_name(), "praia-azul");
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut registry_path: Option<PathBuf> = None;
    let mut seed_name: Option<String> = None;
    let mut compact = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--registry" => {
                registry_path = Some(PathBuf::from(next_value(&mut args, "--registry")?));
            }
            "--seed" => {
                seed_name = Some(next_value(&mut args, "--seed")?);
            }
            "--compact" => compact = true,
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    Ok(ParseOutcome::Options(Options {
        registry_path: registry_path.ok_or(CliError::MissingRegistryPath)?,
        seed_name: seed_name.ok_or(CliError::MissingSeedName)?,
        compact,
    }))
}

/// Loads the registry and generates the selected seed.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be read, the seed is not
/// listed, or generation fails.
pub fn generate(options: &Options) -> Result<ExampleMarketplace, CliError> {
    let registry = SeedRegistry::from_file(&options.registry_path)?;
    let seed_def = registry.find_seed(&options.seed_name)?;
    Ok(generate_marketplace(&registry, seed_def)?)
}

/// Renders a dataset as JSON, pretty-printed unless `compact` is set.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialisation fails.
pub fn render(dataset: &ExampleMarketplace, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(dataset)
    } else {
        serde_json::to_string_pretty(dataset)
    };
    rendered.map_err(|err| CliError::Render {
        message: err.to_string(),
    })
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

#[cfg(test)]
mod tests;
