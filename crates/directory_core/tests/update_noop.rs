use directory_core::{update, DirectoryState, MemberId, Msg};

#[test]
fn idle_messages_leave_state_untouched() {
    for msg in [
        Msg::DetailClosed,
        Msg::ErrorDismissed,
        Msg::DetailOpened(MemberId::from("1")),
    ] {
        let state = DirectoryState::new();
        let (mut next, effects) = update(state.clone(), msg.clone());

        assert_eq!(state, next, "{msg:?}");
        assert!(effects.is_empty(), "{msg:?}");
        assert!(!next.consume_dirty(), "{msg:?}");
    }
}

#[test]
fn more_before_any_load_is_noop() {
    let mut state = DirectoryState::new();
    assert!(!state.consume_dirty());

    let (mut next, effects) = update(state, Msg::MoreRequested);

    assert!(effects.is_empty());
    assert!(next.items().is_empty());
    assert!(!next.consume_dirty());
}
