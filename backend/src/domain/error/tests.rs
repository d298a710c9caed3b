//! Tests for the error payload formatting and validation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::invalid_input("bad"), ErrorCode::InvalidInput)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::unavailable("down"), ErrorCode::Unavailable)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidInput, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = Error::new(ErrorCode::NotFound, "");
}

#[rstest]
#[case(ErrorCode::Forbidden, true)]
#[case(ErrorCode::InvalidInput, true)]
#[case(ErrorCode::NotFound, true)]
#[case(ErrorCode::Unavailable, false)]
fn only_unavailable_is_hidden_from_callers(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_user_facing(), expected);
}

#[rstest]
fn serialises_in_camel_case_without_empty_details() {
    let value = serde_json::to_value(Error::not_found("mission 7 not found"))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "not_found", "message": "mission 7 not found" })
    );
}

#[rstest]
fn deserialising_blank_message_fails_validation() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "forbidden", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
fn details_round_trip_through_dto() {
    let error = Error::invalid_input("bad deadline").with_details(json!({ "field": "deadline" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    let decoded: Error = serde_json::from_value(value).expect("decode error");
    assert_eq!(decoded, error);
}
