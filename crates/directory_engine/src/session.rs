use std::collections::VecDeque;
use std::sync::Arc;

use directory_core::{
    update, DirectoryState, DirectoryViewModel, Effect, FailureKind, FilterSet, LoadError,
    MemberId, Msg,
};
use directory_logging::dir_debug;

use crate::client::DirectoryApi;
use crate::engine::execute_effect;

/// Async driver around one `DirectoryState`.
///
/// Each operation runs its effects inline and returns once the state has
/// absorbed every completion. Taking `&mut self` keeps a session to one
/// operation at a time.
pub struct DirectorySession {
    api: Arc<dyn DirectoryApi>,
    state: DirectoryState,
}

impl DirectorySession {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            state: DirectoryState::new(),
        }
    }

    pub fn with_filters(api: Arc<dyn DirectoryApi>, filters: FilterSet) -> Self {
        Self {
            api,
            state: DirectoryState::with_filters(filters),
        }
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn view(&self) -> DirectoryViewModel {
        self.state.view()
    }

    /// Full reset with new filters. Empty filters repeat the stored query.
    pub async fn load(&mut self, filters: FilterSet) {
        self.dispatch(Msg::FiltersSubmitted(filters)).await;
    }

    pub async fn refresh(&mut self) {
        self.dispatch(Msg::Refresh).await;
    }

    /// Grows the window and appends unseen records. No-op once the end of
    /// the results is known.
    pub async fn load_more(&mut self) {
        self.dispatch(Msg::MoreRequested).await;
    }

    pub async fn open_detail(&mut self, member_id: &MemberId) {
        self.dispatch(Msg::DetailOpened(member_id.clone())).await;
    }

    pub fn close_detail(&mut self) {
        apply(&mut self.state, Msg::DetailClosed);
    }

    pub fn dismiss_error(&mut self) {
        apply(&mut self.state, Msg::ErrorDismissed);
    }

    async fn dispatch(&mut self, msg: Msg) {
        let mut pending: VecDeque<Effect> = apply(&mut self.state, msg).into();
        while let Some(effect) = pending.pop_front() {
            let api = Arc::clone(&self.api);
            let guard = CompletionGuard::new(&mut self.state, &effect);
            let event = execute_effect(api.as_ref(), effect).await;
            pending.extend(guard.complete(event.into_msg()));
        }
    }
}

fn apply(state: &mut DirectoryState, msg: Msg) -> Vec<Effect> {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    effects
}

/// Delivers a cancellation to the state if the awaiting future is dropped
/// before the response arrives, so the state never stays stuck loading.
struct CompletionGuard<'a> {
    state: &'a mut DirectoryState,
    cancellation: Option<Msg>,
}

impl<'a> CompletionGuard<'a> {
    fn new(state: &'a mut DirectoryState, effect: &Effect) -> Self {
        let error = LoadError::new(FailureKind::Cancelled, "request was abandoned");
        let cancellation = match effect {
            Effect::FetchProfessionals { request, .. } => Msg::PageLoaded {
                request: *request,
                result: Err(error),
            },
            Effect::FetchExperiences { request, .. } => Msg::ExperiencesLoaded {
                request: *request,
                result: Err(error),
            },
        };
        Self {
            state,
            cancellation: Some(cancellation),
        }
    }

    fn complete(mut self, msg: Msg) -> Vec<Effect> {
        self.cancellation = None;
        apply(self.state, msg)
    }
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        if let Some(msg) = self.cancellation.take() {
            dir_debug!("operation dropped mid-flight; delivering cancellation");
            apply(self.state, msg);
        }
    }
}
