use crate::{DirectoryState, Effect, FilterSet, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DirectoryState, msg: Msg) -> (DirectoryState, Vec<Effect>) {
    let effects = match msg {
        Msg::FiltersSubmitted(filters) => vec![state.begin_load(filters)],
        // Empty filters fall back to the stored ones, so this repeats the
        // last query.
        Msg::Refresh => vec![state.begin_load(FilterSet::default())],
        Msg::MoreRequested => state.begin_load_more().into_iter().collect(),
        Msg::PageLoaded { request, result } => {
            state.apply_page(request, result);
            Vec::new()
        }
        Msg::DetailOpened(member_id) => state.open_detail(&member_id).into_iter().collect(),
        Msg::DetailClosed => {
            state.close_detail();
            Vec::new()
        }
        Msg::ExperiencesLoaded { request, result } => {
            state.apply_experiences(request, result);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.dismiss_error();
            Vec::new()
        }
    };

    (state, effects)
}
