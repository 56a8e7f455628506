//! Directory core: pure result-accumulation state machine and view-model helpers.
mod detail;
mod effect;
mod error;
mod filters;
mod format;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use detail::{DetailPanel, ExperienceLoad};
pub use effect::Effect;
pub use error::{FailureKind, LoadError};
pub use filters::{FilterSet, COMPANY_QUERY_KEY, JOB_QUERY_KEY, PERSON_ID_KEY};
pub use format::{score_label, split_line_markers, with_fallback, LINE_MARKER};
pub use msg::Msg;
pub use record::{ExperienceRecord, MemberId, ProfessionalRecord, ResultPage};
pub use state::{DirectoryState, Phase, RequestId, PAGE_SIZE};
pub use update::update;
pub use view_model::{
    CardView, DetailView, DirectoryViewModel, ExperienceRow, ExperiencesView,
};
