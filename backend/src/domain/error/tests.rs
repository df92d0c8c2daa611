//! Tests for the domain error payload and its serde contract.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn roster_error() -> DomainError {
    DomainError::invalid_request("roster rejected").with_details(json!({
        "missingLocation": [{"id": 3, "name": "Bia"}],
        "locationMismatch": [],
    }))
}

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = DomainError::new(ErrorCode::InternalError, "");
}

#[rstest]
fn serializes_code_in_snake_case(roster_error: DomainError) {
    let value = serde_json::to_value(&roster_error).expect("serialize error");
    assert_eq!(value["code"], json!("invalid_request"));
    assert_eq!(value["message"], json!("roster rejected"));
    assert_eq!(value["details"]["missingLocation"][0]["id"], json!(3));
}

#[rstest]
fn omits_absent_details() {
    let value = serde_json::to_value(DomainError::not_found("service 7 not found")).expect("serialize");
    assert!(value.get("details").is_none());
}

#[rstest]
fn deserialization_rejects_blank_message() {
    let payload = json!({"code": "not_found", "message": " "});
    let result = serde_json::from_value::<DomainError>(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialization_restores_details(roster_error: DomainError) {
    let encoded = serde_json::to_string(&roster_error).expect("serialize");
    let decoded: DomainError = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, roster_error);
}

#[rstest]
fn display_uses_message() {
    assert_eq!(DomainError::internal("boom").to_string(), "boom");
}
