//! `backoffice` entry-point: parses the command line, runs one command and
//! prints its JSON result.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backoffice::cli::{self, Cli, CliError, CommandOutput};
use backoffice::config::{BackofficeSettings, LogFormat};

fn init_tracing(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(err) = result {
        warn!(error = %err, "tracing init failed");
    }
}

fn execute(cli: Cli, settings: &BackofficeSettings) -> Result<CommandOutput, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| CliError::Runtime {
            message: err.to_string(),
        })?;
    runtime.block_on(cli::run(cli, settings))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match BackofficeSettings::load_ambient() {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(LogFormat::default());
            error!(error = %err, "settings rejected");
            return ExitCode::from(2);
        }
    };
    let format = match settings.log_format() {
        Ok(format) => format,
        Err(err) => {
            init_tracing(LogFormat::default());
            error!(error = %err, "settings rejected");
            return ExitCode::from(2);
        }
    };
    init_tracing(format);

    match execute(cli, &settings) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(err) = writeln!(stdout, "{}", output.value) {
                error!(error = %err, "failed to write output");
                return ExitCode::FAILURE;
            }
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::from(2)
        }
    }
}
