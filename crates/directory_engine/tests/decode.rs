use directory_core::ResultPage;
use directory_engine::{decode_experiences, decode_page, error_message, ApiError};
use pretty_assertions::assert_eq;

#[test]
fn missing_or_null_data_is_empty() {
    assert_eq!(decode_page(br#"{}"#).unwrap(), ResultPage::Empty);
    assert_eq!(decode_page(br#"{"data": null}"#).unwrap(), ResultPage::Empty);
    assert_eq!(decode_page(br#"{"data": []}"#).unwrap(), ResultPage::Empty);
    assert_eq!(decode_page(b"  \n").unwrap(), ResultPage::Empty);
}

#[test]
fn object_without_identity_is_empty() {
    let page = decode_page(br#"{"data": {"message": "no match"}}"#).unwrap();
    assert_eq!(page, ResultPage::Empty);
}

#[test]
fn list_entry_without_identity_is_a_decode_error() {
    let err = decode_page(br#"{"data": [{"data_member_id": "1"}, {"name": "x"}]}"#).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[test]
fn malformed_json_is_a_decode_error() {
    let err = decode_page(b"<html>oops</html>").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn experiences_tolerate_missing_data() {
    assert!(decode_experiences(br#"{}"#).unwrap().is_empty());
    assert!(decode_experiences(br#"{"data": null}"#).unwrap().is_empty());
    let err = decode_experiences(br#"{"data": {"title": "CTO"}}"#).unwrap_err();
    assert_eq!(
        err,
        ApiError::Decode("expected a list of experiences, got an object".to_string())
    );
}

#[test]
fn error_message_prefers_known_fields() {
    assert_eq!(
        error_message(br#"{"message": "bad company id"}"#).as_deref(),
        Some("bad company id")
    );
    assert_eq!(
        error_message(br#"{"error": {"message": "quota exceeded"}}"#).as_deref(),
        Some("quota exceeded")
    );
    assert_eq!(
        error_message(b"Service Unavailable\n").as_deref(),
        Some("Service Unavailable")
    );
    assert_eq!(error_message(b""), None);
}
