//! Tests for command parsing and execution.

use std::io::Write as _;

use env_lock::lock_env;
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::NamedTempFile;

use super::*;
use crate::domain::validate;

#[fixture]
fn settings() -> BackofficeSettings {
    BackofficeSettings {
        report_utc_offset_minutes: None,
        log_format: None,
        generate_count: 1,
    }
}

fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{value}").expect("write temp file");
    file
}

async fn run_args(args: &[&str], settings: &BackofficeSettings) -> Result<CommandOutput, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("backoffice").chain(args.iter().copied()))
        .expect("arguments parse");
    run(cli, settings).await
}

#[rstest]
#[case("529.982.247-25", "52998224725", "CPF")]
#[case("11.222.333/0001-81", "11222333000181", "CNPJ")]
#[tokio::test]
async fn validate_accepts_masked_documents(
    settings: BackofficeSettings,
    #[case] number: &str,
    #[case] digits: &str,
    #[case] kind: &str,
) {
    let output = run_args(&["document", "validate", number], &settings)
        .await
        .expect("command runs");
    assert!(output.success);
    assert_eq!(output.value["valid"], json!(true));
    assert_eq!(output.value["digits"], json!(digits));
    assert_eq!(output.value["kind"], json!(kind));
}

#[rstest]
#[case(&["document", "validate", "52998224726"])]
#[case(&["document", "validate", "111.111.111-11"])]
#[case(&["document", "validate", "--kind", "cnpj", "52998224725"])]
#[tokio::test]
async fn validate_rejects_bad_documents(settings: BackofficeSettings, #[case] args: &[&str]) {
    let output = run_args(args, &settings).await.expect("command runs");
    assert!(!output.success);
    assert_eq!(output.value["valid"], json!(false));
    assert!(output.value["error"].is_string());
}

#[tokio::test]
async fn commands_run_with_ambient_defaults() {
    let ambient = {
        let _guard = lock_env(
            [
                "BACKOFFICE_REPORT_UTC_OFFSET_MINUTES",
                "BACKOFFICE_LOG_FORMAT",
                "BACKOFFICE_GENERATE_COUNT",
            ]
            .map(|name| (name, None::<String>)),
        );
        BackofficeSettings::load_ambient().expect("settings load without any source")
    };
    assert_eq!(ambient.generate_count(), 1);

    let output = run_args(&["document", "validate", "529.982.247-25"], &ambient)
        .await
        .expect("command runs");
    assert!(output.success);
    assert_eq!(output.value["valid"], json!(true));
}

#[rstest]
#[tokio::test]
async fn seeded_generation_is_reproducible(settings: BackofficeSettings) {
    let args = ["document", "generate", "--kind", "cnpj", "--count", "3", "--seed", "42"];
    let first = run_args(&args, &settings).await.expect("first run");
    let second = run_args(&args, &settings).await.expect("second run");
    assert_eq!(first, second);

    let documents = first.value["documents"]
        .as_array()
        .expect("documents array");
    assert_eq!(documents.len(), 3);
    for document in documents {
        let digits = document.as_str().expect("string document");
        assert!(validate(DocumentKind::Cnpj, digits), "{digits} should validate");
    }
}

#[rstest]
#[tokio::test]
async fn generation_count_falls_back_to_settings(settings: BackofficeSettings) {
    let configured = BackofficeSettings {
        generate_count: 4,
        ..settings
    };
    let output = run_args(&["document", "generate", "--kind", "cpf", "--masked"], &configured)
        .await
        .expect("command runs");
    let documents = output.value["documents"].as_array().expect("documents array");
    assert_eq!(documents.len(), 4);
    assert!(documents.iter().all(|doc| doc.as_str().is_some_and(|d| d.contains('-'))));
}

#[rstest]
#[tokio::test]
async fn check_digits_are_reported(settings: BackofficeSettings) {
    let output = run_args(
        &["document", "check-digits", "--kind", "cpf", "496433352"],
        &settings,
    )
    .await
    .expect("command runs");
    assert_eq!(output.value["checkDigits"], json!([3, 2]));
    assert_eq!(output.value["document"], json!("49643335232"));
}

#[rstest]
#[tokio::test]
async fn check_digits_reject_wrong_length(settings: BackofficeSettings) {
    let err = run_args(
        &["document", "check-digits", "--kind", "cnpj", "123"],
        &settings,
    )
    .await
    .expect_err("short input");
    assert!(matches!(err, CliError::CheckDigits(_)));
}

#[rstest]
#[tokio::test]
async fn roster_check_accepts_local_staff(settings: BackofficeSettings) {
    let file = json_file(&json!({
        "serviceLocationId": 3,
        "candidates": [
            { "id": 1, "name": "Ana", "locationId": 3 },
            { "id": 2, "name": "Bruno", "locationId": 3 }
        ]
    }));
    let path = file.path().to_str().expect("utf-8 path");
    let output = run_args(&["roster", "check", "--input", path], &settings)
        .await
        .expect("command runs");
    assert!(output.success);
    assert_eq!(output.value, json!({ "valid": true }));
}

#[rstest]
#[tokio::test]
async fn roster_check_lists_offenders(settings: BackofficeSettings) {
    let file = json_file(&json!({
        "serviceLocationId": 3,
        "candidates": [
            { "id": 1, "name": "Ana", "locationId": 3 },
            { "id": 2, "name": "Bruno" },
            { "id": 3, "name": "Carla", "locationId": 7 }
        ]
    }));
    let path = file.path().to_str().expect("utf-8 path");
    let output = run_args(&["roster", "check", "--input", path], &settings)
        .await
        .expect("command runs");
    assert!(!output.success);
    assert_eq!(
        output.value["violation"],
        json!({
            "missingLocation": [{ "id": 2, "name": "Bruno" }],
            "locationMismatch": [{ "id": 3, "name": "Carla" }]
        })
    );
}

#[rstest]
#[tokio::test]
async fn report_honours_filters(settings: BackofficeSettings) {
    let file = json_file(&json!([
        { "id": 1, "amount": 1000, "status": "PAID", "createdAt": "2025-01-10T12:00:00Z",
          "paidAt": "2025-01-11T12:00:00Z", "agencyId": 8 },
        { "id": 2, "amount": 500, "status": "PENDING", "createdAt": "2025-02-10T12:00:00Z",
          "agencyId": 8 },
        { "id": 3, "amount": 9000, "status": "PAID", "createdAt": "2025-02-12T12:00:00Z",
          "agencyId": 9 }
    ]));
    let path = file.path().to_str().expect("utf-8 path");
    let output = run_args(&["report", "--input", path, "--agency", "8"], &settings)
        .await
        .expect("command runs");

    assert!(output.success);
    let summary = &output.value["summary"];
    assert_eq!(summary["totalPayments"], json!(2));
    assert_eq!(summary["totalPaidAmount"], json!(1000));
    assert_eq!(summary["totalPendingAmount"], json!(500));
    assert_eq!(summary["averageTransactionValue"], json!(750));
    assert_eq!(
        output.value["monthly"],
        json!({
            "2025-01": { "totalAmount": 1000, "transactionCount": 1 },
            "2025-02": { "totalAmount": 500, "transactionCount": 1 }
        })
    );
}

#[rstest]
#[tokio::test]
async fn report_rejects_inverted_window(settings: BackofficeSettings) {
    let file = json_file(&json!([]));
    let path = file.path().to_str().expect("utf-8 path");
    let err = run_args(
        &[
            "report",
            "--input",
            path,
            "--from",
            "2025-03-01T00:00:00Z",
            "--to",
            "2025-02-01T00:00:00Z",
        ],
        &settings,
    )
    .await
    .expect_err("inverted window");
    assert!(matches!(err, CliError::Domain(_)));
}

#[rstest]
#[tokio::test]
async fn unreadable_input_is_reported(settings: BackofficeSettings) {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.json");
    let path = missing.to_str().expect("utf-8 path");
    let err = run_args(&["report", "--input", path], &settings)
        .await
        .expect_err("missing file");
    assert!(matches!(err, CliError::Read { .. }));
}

#[rstest]
#[tokio::test]
async fn malformed_input_is_reported(settings: BackofficeSettings) {
    let file = json_file(&json!({ "not": "a payment list" }));
    let path = file.path().to_str().expect("utf-8 path");
    let err = run_args(&["report", "--input", path], &settings)
        .await
        .expect_err("wrong shape");
    assert!(matches!(err, CliError::Parse { .. }));
}
