//! Command-line surface of the `backoffice` binary.
//!
//! Parsing and execution live here so they can be exercised without spawning
//! a process. Every command produces a JSON value; `main` prints it and turns
//! [`CommandOutput::success`] into the exit status.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::config::{BackofficeSettings, ConfigError};
use crate::domain::ports::{FinancialReportQuery, ReportFilter};
use crate::domain::{
    CheckDigitContractError, DocumentKind, DocumentNumber, DomainError, FinancialReportService,
    LocationId, Payment, StaffCandidate, UserId, check_roster, compute_check_digits, generate,
    generate_with,
};
use crate::outbound::memory::InMemoryPaymentRepository;

/// `backoffice` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "backoffice",
    about = "Marketplace back-office checks: documents, service rosters and payment reports",
    version
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// CPF and CNPJ utilities.
    Document {
        /// Document action.
        #[command(subcommand)]
        action: DocumentCommand,
    },
    /// Service roster checks.
    Roster {
        /// Roster action.
        #[command(subcommand)]
        action: RosterCommand,
    },
    /// Build a financial report from a JSON array of payments.
    Report(ReportArgs),
}

/// Document type accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Individual taxpayer number, 11 digits.
    Cpf,
    /// Company registration number, 14 digits.
    Cnpj,
}

impl From<KindArg> for DocumentKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Cpf => Self::Cpf,
            KindArg::Cnpj => Self::Cnpj,
        }
    }
}

/// Document actions.
#[derive(Debug, Clone, Subcommand)]
pub enum DocumentCommand {
    /// Validate a CPF or CNPJ, masked or bare.
    Validate {
        /// Document number.
        number: String,
        /// Expected type; detected from the digit count when omitted.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Generate checksum-valid documents.
    Generate {
        /// Type to generate.
        #[arg(long, value_enum)]
        kind: KindArg,
        /// How many documents; defaults to `BACKOFFICE_GENERATE_COUNT` or 1.
        #[arg(long)]
        count: Option<usize>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Print masked numbers.
        #[arg(long)]
        masked: bool,
    },
    /// Compute the two check digits for the leading digits of a document.
    CheckDigits {
        /// Type of document.
        #[arg(long, value_enum)]
        kind: KindArg,
        /// 9 leading digits for CPF, 12 for CNPJ.
        leading: String,
    },
}

/// Roster actions.
#[derive(Debug, Clone, Subcommand)]
pub enum RosterCommand {
    /// Check a proposed roster against a service location.
    Check {
        /// JSON file with `serviceLocationId` and `candidates`.
        #[arg(long, value_name = "path")]
        input: PathBuf,
    },
}

/// Arguments for `report`.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// JSON file holding an array of payments.
    #[arg(long, value_name = "path")]
    pub input: PathBuf,
    /// Earliest creation instant to include (RFC 3339).
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,
    /// Latest creation instant to include (RFC 3339).
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,
    /// Only payments attributed to this agency id.
    #[arg(long)]
    pub agency: Option<i64>,
    /// Only payments attributed to this supplier id.
    #[arg(long)]
    pub supplier: Option<i64>,
}

impl From<&ReportArgs> for ReportFilter {
    fn from(args: &ReportArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            agency_id: args.agency.map(UserId::new),
            supplier_id: args.supplier.map(UserId::new),
        }
    }
}

/// Errors that stop a command before it produces output.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("read input file '{path}': {message}")]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },
    /// Input file was not valid JSON for the command.
    #[error("parse input file '{path}': {message}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying decoder message.
        message: String,
    },
    /// Leading digits had the wrong shape.
    #[error(transparent)]
    CheckDigits(#[from] CheckDigitContractError),
    /// Settings could not be interpreted.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A domain service rejected the request.
    #[error("{0}")]
    Domain(#[from] DomainError),
    /// The async runtime could not start.
    #[error("failed to start runtime: {message}")]
    Runtime {
        /// Underlying I/O message.
        message: String,
    },
}

/// JSON produced by a command, and whether the checked input was valid.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Value printed to stdout.
    pub value: Value,
    /// `false` when the command ran but found the input invalid.
    pub success: bool,
}

impl CommandOutput {
    const fn ok(value: Value) -> Self {
        Self {
            value,
            success: true,
        }
    }

    const fn rejected(value: Value) -> Self {
        Self {
            value,
            success: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterCheckInput {
    service_location_id: LocationId,
    #[serde(default)]
    candidates: Vec<StaffCandidate>,
}

/// Run a parsed command.
///
/// # Errors
///
/// Returns [`CliError`] when input cannot be read or a service fails.
pub async fn run(cli: Cli, settings: &BackofficeSettings) -> Result<CommandOutput, CliError> {
    match cli.command {
        Command::Document { action } => run_document(action, settings),
        Command::Roster {
            action: RosterCommand::Check { input },
        } => run_roster_check(&input),
        Command::Report(args) => run_report(&args, settings).await,
    }
}

fn run_document(
    action: DocumentCommand,
    settings: &BackofficeSettings,
) -> Result<CommandOutput, CliError> {
    match action {
        DocumentCommand::Validate { number, kind } => Ok(validate_document(&number, kind)),
        DocumentCommand::Generate {
            kind,
            count,
            seed,
            masked,
        } => {
            let count = count.unwrap_or_else(|| settings.generate_count());
            Ok(CommandOutput::ok(generate_documents(
                kind.into(),
                count,
                seed,
                masked,
            )))
        }
        DocumentCommand::CheckDigits { kind, leading } => {
            let kind = DocumentKind::from(kind);
            let [first, second] = compute_check_digits(kind, &leading)?;
            Ok(CommandOutput::ok(json!({
                "kind": kind,
                "leading": leading,
                "checkDigits": [first, second],
                "document": format!("{leading}{first}{second}"),
            })))
        }
    }
}

fn validate_document(number: &str, kind: Option<KindArg>) -> CommandOutput {
    let parsed = match kind {
        Some(kind) => DocumentNumber::parse(kind.into(), number),
        None => DocumentNumber::parse_any(number),
    };
    match parsed {
        Ok(document) => CommandOutput::ok(json!({
            "valid": true,
            "kind": document.kind(),
            "digits": document.digits(),
            "masked": document.masked(),
        })),
        Err(err) => CommandOutput::rejected(json!({
            "valid": false,
            "error": err.to_string(),
        })),
    }
}

fn generate_documents(kind: DocumentKind, count: usize, seed: Option<u64>, masked: bool) -> Value {
    let raw: Vec<String> = match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count).map(|_| generate_with(kind, &mut rng)).collect()
        }
        None => (0..count).map(|_| generate(kind)).collect(),
    };
    let documents: Vec<String> = if masked {
        raw.iter()
            .filter_map(|digits| DocumentNumber::parse(kind, digits).ok())
            .map(|document| document.masked())
            .collect()
    } else {
        raw
    };
    json!({ "kind": kind, "documents": documents })
}

fn run_roster_check(input: &Path) -> Result<CommandOutput, CliError> {
    let request: RosterCheckInput = read_json(input)?;
    match check_roster(request.service_location_id, &request.candidates) {
        Ok(()) => {
            info!(
                location_id = %request.service_location_id,
                candidates = request.candidates.len(),
                "roster accepted"
            );
            Ok(CommandOutput::ok(json!({ "valid": true })))
        }
        Err(violation) => {
            warn!(
                location_id = %request.service_location_id,
                offenders = violation.offender_ids().len(),
                "roster rejected"
            );
            Ok(CommandOutput::rejected(json!({
                "valid": false,
                "message": violation.to_string(),
                "violation": violation,
            })))
        }
    }
}

async fn run_report(
    args: &ReportArgs,
    settings: &BackofficeSettings,
) -> Result<CommandOutput, CliError> {
    let payments: Vec<Payment> = read_json(&args.input)?;
    let repo = Arc::new(InMemoryPaymentRepository::new(payments));
    let service = FinancialReportService::with_timezone(repo, settings.bucket_timezone()?);
    let report = service.financial_report(&ReportFilter::from(args)).await?;
    let value = serde_json::to_value(&report)
        .map_err(|err| DomainError::internal(format!("failed to serialize report: {err}")))?;
    Ok(CommandOutput::ok(value))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let read_error = |message: String| CliError::Read {
        path: path.to_path_buf(),
        message,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| read_error("input path must name a file".to_owned()))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| read_error(err.to_string()))?;
    let contents = directory
        .read_to_string(Path::new(file_name))
        .map_err(|err| read_error(err.to_string()))?;
    serde_json::from_str(&contents).map_err(|err| CliError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
