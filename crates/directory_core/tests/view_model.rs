use directory_core::{
    update, CardView, DirectoryState, FailureKind, FilterSet, LoadError, Msg, Phase,
    ProfessionalRecord, ResultPage,
};
use pretty_assertions::assert_eq;

fn submitted(filters: FilterSet) -> (DirectoryState, u64) {
    let (state, effects) = update(DirectoryState::new(), Msg::FiltersSubmitted(filters));
    let request = effects[0].request();
    (state, request)
}

#[test]
fn idle_state_shows_empty_notice() {
    let view = DirectoryState::new().view();
    assert!(view.cards.is_empty());
    assert!(!view.loading);
    assert!(view.show_empty_notice);
    assert!(!view.show_end_notice);
    assert_eq!(view.phase, Phase::Idle);
}

#[test]
fn loading_hides_notices() {
    let (state, _) = submitted(FilterSet::new().company("1035"));
    let view = state.view();
    assert!(view.loading);
    assert!(!view.show_empty_notice);
    assert!(!view.show_end_notice);
}

#[test]
fn cards_apply_presentation_fallbacks() {
    let (state, request) = submitted(FilterSet::new().person("7"));
    let record = ProfessionalRecord {
        name: Some("Grace".to_string()),
        headline: Some("   ".to_string()),
        score: Some(92.0),
        ..ProfessionalRecord::with_id("7")
    };
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(ResultPage::Single(record)),
        },
    );

    let view = state.view();
    assert_eq!(
        view.cards,
        vec![CardView {
            member_id: "7".to_string(),
            name: "Grace".to_string(),
            headline: "No headline available".to_string(),
            location: "Location not specified".to_string(),
            bio_lines: vec!["No biography available".to_string()],
            score: "Score: 92".to_string(),
        }]
    );
    assert!(view.show_end_notice);
    assert!(!view.has_more);
}

#[test]
fn bio_markers_become_lines() {
    let (state, request) = submitted(FilterSet::new().company("1035"));
    let record = ProfessionalRecord {
        bio: Some("Sales lead[nl]Mentor".to_string()),
        location: Some("Lyon".to_string()),
        ..ProfessionalRecord::with_id("3")
    };
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(ResultPage::Many(vec![record])),
        },
    );

    let card = &state.view().cards[0];
    assert_eq!(card.bio_lines, vec!["Sales lead", "Mentor"]);
    assert_eq!(card.location, "Lyon");
    assert_eq!(card.score, "Score: ?");
}

#[test]
fn error_replaces_empty_notice() {
    let (state, request) = submitted(FilterSet::new().job("CTO"));
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Err(LoadError::new(FailureKind::Timeout, "after 30s")),
        },
    );

    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("timeout: after 30s"));
    assert!(!view.show_empty_notice);
    assert_eq!(view.phase, Phase::Failed);

    let (state, _) = update(state, Msg::ErrorDismissed);
    let view = state.view();
    assert_eq!(view.error, None);
    assert_eq!(view.phase, Phase::Ready);
    assert!(view.show_empty_notice);
}
