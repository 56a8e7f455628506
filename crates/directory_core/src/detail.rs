use crate::{ExperienceRecord, MemberId, ProfessionalRecord, RequestId};

/// Fetch state of the experiences shown in an open detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExperienceLoad {
    #[default]
    NotStarted,
    Loading,
    /// May legitimately be empty; an empty list is still "loaded".
    Loaded(Vec<ExperienceRecord>),
    Failed(String),
}

impl ExperienceLoad {
    pub fn is_started(&self) -> bool {
        !matches!(self, ExperienceLoad::NotStarted)
    }
}

/// An open detail view. Holds its own copy of the record so a reset of the
/// result list does not blank it.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    record: ProfessionalRecord,
    experiences: ExperienceLoad,
    request: Option<RequestId>,
}

impl DetailPanel {
    pub(crate) fn new(record: ProfessionalRecord) -> Self {
        Self {
            record,
            experiences: ExperienceLoad::NotStarted,
            request: None,
        }
    }

    pub fn record(&self) -> &ProfessionalRecord {
        &self.record
    }

    pub fn member_id(&self) -> &MemberId {
        self.record.id()
    }

    pub fn experiences(&self) -> &ExperienceLoad {
        &self.experiences
    }

    pub(crate) fn begin_fetch(&mut self, request: RequestId) {
        self.request = Some(request);
        self.experiences = ExperienceLoad::Loading;
    }

    /// Applies a completion if it answers the pending fetch. Returns whether
    /// anything changed.
    pub(crate) fn complete_fetch(
        &mut self,
        request: RequestId,
        result: Result<Vec<ExperienceRecord>, String>,
    ) -> bool {
        if self.request != Some(request) || self.experiences != ExperienceLoad::Loading {
            return false;
        }
        self.request = None;
        self.experiences = match result {
            Ok(records) => ExperienceLoad::Loaded(records),
            Err(message) => ExperienceLoad::Failed(message),
        };
        true
    }
}
