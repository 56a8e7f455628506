use crate::{FilterSet, MemberId, RequestId};

/// IO the state machine asks its host to perform. Every effect must be
/// answered by exactly one completion message carrying the same `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Answered by `Msg::PageLoaded`.
    FetchProfessionals {
        request: RequestId,
        filters: FilterSet,
        window_size: usize,
    },
    /// Answered by `Msg::ExperiencesLoaded`.
    FetchExperiences {
        request: RequestId,
        member_id: MemberId,
    },
}

impl Effect {
    pub fn request(&self) -> RequestId {
        match self {
            Effect::FetchProfessionals { request, .. } | Effect::FetchExperiences { request, .. } => {
                *request
            }
        }
    }
}
