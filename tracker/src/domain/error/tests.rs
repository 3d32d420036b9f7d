//! Tests for the error payload constructors and serialisation contract.

use rstest::rstest;
use serde_json::json;

use super::*;

#[rstest]
#[case(DomainError::validation("bad"), ErrorCode::Validation)]
#[case(DomainError::unauthorized("nope"), ErrorCode::Unauthorized)]
#[case(DomainError::not_found("missing"), ErrorCode::NotFound)]
#[case(DomainError::already_exists("taken"), ErrorCode::AlreadyExists)]
#[case(DomainError::invalid_state("dispatched"), ErrorCode::InvalidState)]
#[case(DomainError::signature_missing("no signature"), ErrorCode::SignatureMissing)]
#[case(DomainError::invalid_field("unknown"), ErrorCode::InvalidField)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::Internal)]
fn convenience_constructors_set_codes(#[case] err: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::Validation, "   ");
    assert!(matches!(
        result,
        Err(DomainErrorValidationError::EmptyMessage)
    ));
}

#[rstest]
fn display_shows_the_message() {
    let err = DomainError::not_found("asset PNP-AB12CD not found");
    assert_eq!(err.to_string(), "asset PNP-AB12CD not found");
}

#[rstest]
fn details_round_trip_through_serialisation() {
    let err = DomainError::validation("asset name is required")
        .with_details(json!({ "field": "asset_name" }));

    let encoded = serde_json::to_value(&err).expect("serialises");
    assert_eq!(encoded["code"], "validation");
    assert_eq!(encoded["details"]["field"], "asset_name");

    let decoded: DomainError = serde_json::from_value(encoded).expect("deserialises");
    assert_eq!(decoded, err);
}

#[rstest]
fn deserialisation_rejects_empty_messages() {
    let payload = json!({ "code": "validation", "message": "  " });
    let decoded: Result<DomainError, _> = serde_json::from_value(payload);
    assert!(decoded.is_err());
}
