//! Unit tests for the generation CLI helpers.

use std::io::Write as _;

use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;
use crate::error::RegistryError;

const VALID_JSON: &str = r#"{
    "version": 1,
    "firstMonth": "2025-03",
    "locations": [{"city": "Natal", "state": "RN"}],
    "serviceNames": ["Dune buggy tour"],
    "seeds": [{"name": "praia-azul", "seed": 2026, "userCount": 6, "serviceCount": 2,
               "paymentCount": 5, "months": 2}]
}"#;

#[fixture]
fn registry_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create registry file");
    file.write_all(VALID_JSON.as_bytes())
        .expect("write registry");
    file
}

fn args(values: &[&str]) -> impl Iterator<Item = String> {
    values
        .iter()
        .map(|value| (*value).to_owned())
        .collect::<Vec<_>>()
        .into_iter()
}

fn options_for(file: &NamedTempFile, seed: &str) -> Options {
    let path = file.path().to_str().expect("utf-8 path");
    match parse_args(args(&["--registry", path, "--seed", seed])).expect("parse args") {
        ParseOutcome::Options(options) => options,
        ParseOutcome::Help => panic!("expected options"),
    }
}

#[test]
fn parse_args_returns_help_for_help_flag() {
    let outcome = parse_args(args(&["--seed", "x", "-h"])).expect("parse args");
    assert_eq!(outcome, ParseOutcome::Help);
}

#[rstest]
#[case::no_registry(&["--seed", "praia-azul"], CliError::MissingRegistryPath)]
#[case::no_seed(&["--registry", "seeds.json"], CliError::MissingSeedName)]
#[case::dangling_flag(&["--registry"], CliError::MissingValue { flag: "--registry" })]
#[case::unknown(&["--user-count", "3"], CliError::UnknownArgument { value: "--user-count".to_owned() })]
fn parse_args_rejects_bad_input(#[case] input: &[&str], #[case] expected: CliError) {
    assert_eq!(parse_args(args(input)), Err(expected));
}

#[test]
fn parse_args_reads_compact_flag() {
    let outcome =
        parse_args(args(&["--compact", "--registry", "s.json", "--seed", "a"])).expect("parse");
    let ParseOutcome::Options(options) = outcome else {
        panic!("expected options");
    };
    assert!(options.compact());
    assert_eq!(options.registry_path(), Path::new("s.json"));
}

#[rstest]
fn generate_reads_registry_and_seed(registry_file: NamedTempFile) {
    let dataset = generate(&options_for(&registry_file, "praia-azul")).expect("generate");
    assert_eq!(dataset.users.len(), 6);
    assert_eq!(dataset.services.len(), 2);
    assert_eq!(dataset.payments.len(), 5);
}

#[rstest]
fn generate_reports_unknown_seed(registry_file: NamedTempFile) {
    let err = generate(&options_for(&registry_file, "serra-verde")).expect_err("unknown seed");
    assert_eq!(
        err,
        CliError::Registry {
            source: RegistryError::SeedNotFound {
                name: "serra-verde".to_owned()
            }
        }
    );
}

#[test]
fn generate_reports_missing_registry() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.json");
    let options = Options {
        registry_path: missing,
        seed_name: "praia-azul".to_owned(),
        compact: false,
    };
    let err = generate(&options).expect_err("missing registry");
    assert!(matches!(
        err,
        CliError::Registry {
            source: RegistryError::IoError { .. }
        }
    ));
}

#[rstest]
fn render_switches_between_pretty_and_compact(registry_file: NamedTempFile) {
    let dataset = generate(&options_for(&registry_file, "praia-azul")).expect("generate");
    let compact = render(&dataset, true).expect("compact");
    let pretty = render(&dataset, false).expect("pretty");

    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    let reparsed: serde_json::Value = serde_json::from_str(&compact).expect("valid JSON");
    assert_eq!(reparsed["locations"][0]["city"], "Natal");
}
