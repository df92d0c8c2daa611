//! Prints a generated example marketplace as JSON.
//!
//! This binary delegates to `example_data::generate_cli` for parsing and
//! generation, keeping the behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use example_data::generate_cli::{CliError, ParseOutcome, generate, parse_args, render};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let dataset = generate(&options)?;
            let rendered = render(&dataset, options.compact())?;
            write_output(&rendered);
            Ok(())
        }
    }
}

fn print_usage(mut out: impl Write) {
    let usage = concat!(
        "Usage: example-data-generate --registry <path> --seed <name> [options]\n",
        "\n",
        "Options:\n",
        "  --registry <path>    Path to the seed registry JSON file\n",
        "  --seed <name>        Name of the seed to generate\n",
        "  --compact            Print the dataset on one line\n",
        "  -h, --help           Print this help output\n",
    );
    if let Err(err) = out.write_all(usage.as_bytes()) {
        drop(err);
    }
}

fn write_output(rendered: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{rendered}") {
        drop(err);
    }
}
