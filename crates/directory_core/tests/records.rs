use directory_core::{score_label, split_line_markers, MemberId, ProfessionalRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn member_id_accepts_strings_and_integers() {
    let from_text: ProfessionalRecord =
        serde_json::from_value(json!({ "data_member_id": "42" })).unwrap();
    let from_int: ProfessionalRecord =
        serde_json::from_value(json!({ "data_member_id": 42 })).unwrap();

    assert_eq!(from_text.id(), &MemberId::new("42"));
    assert_eq!(from_text.id(), from_int.id());
}

#[test]
fn record_without_identity_is_rejected() {
    let result = serde_json::from_value::<ProfessionalRecord>(json!({ "name": "Nobody" }));
    assert!(result.is_err());
}

#[test]
fn display_fields_are_optional_and_lenient() {
    let record: ProfessionalRecord = serde_json::from_value(json!({
        "data_member_id": 7,
        "name": "Grace Hopper",
        "bio": "Admiral[nl]Compiler pioneer",
        "score": "91",
        "linkedin_url": null,
        "unexpected": { "nested": true }
    }))
    .unwrap();

    assert_eq!(record.name.as_deref(), Some("Grace Hopper"));
    assert_eq!(record.headline, None);
    assert_eq!(record.score, Some(91.0));
    assert_eq!(record.linkedin_url, None);
    assert_eq!(score_label(record.score), "Score: 91");
    assert_eq!(
        split_line_markers(record.bio.as_deref().unwrap()),
        vec!["Admiral", "Compiler pioneer"]
    );
}

#[test]
fn unparseable_score_renders_fallback() {
    let record: ProfessionalRecord =
        serde_json::from_value(json!({ "data_member_id": "1", "score": "n/a" })).unwrap();
    assert_eq!(record.score, None);
    assert_eq!(score_label(record.score), "Score: ?");

    let record: ProfessionalRecord =
        serde_json::from_value(json!({ "data_member_id": "1", "score": null })).unwrap();
    assert_eq!(record.score, None);
}
