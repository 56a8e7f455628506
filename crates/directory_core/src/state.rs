use std::collections::HashSet;

use directory_logging::{dir_debug, dir_info, dir_warn};

use crate::view_model::DirectoryViewModel;
use crate::{
    DetailPanel, Effect, ExperienceRecord, FilterSet, LoadError, MemberId, ProfessionalRecord,
    ResultPage,
};

/// Results requested per page; the window grows by this much per `MoreRequested`.
pub const PAGE_SIZE: usize = 30;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    /// First page of a new query; replaces the list.
    Reset,
    /// Grown window of the current query; appends unseen records.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request: RequestId,
    kind: FetchKind,
}

/// Accumulated results for one directory view.
///
/// `seen_ids` always equals the set of ids in `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryState {
    filters: FilterSet,
    items: Vec<ProfessionalRecord>,
    seen_ids: HashSet<MemberId>,
    page: usize,
    window_size: usize,
    phase: Phase,
    error: Option<LoadError>,
    has_more: bool,
    in_flight: Option<InFlight>,
    last_request: RequestId,
    detail: Option<DetailPanel>,
    dirty: bool,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            filters: FilterSet::default(),
            items: Vec::new(),
            seen_ids: HashSet::new(),
            page: 1,
            window_size: PAGE_SIZE,
            phase: Phase::Idle,
            error: None,
            has_more: false,
            in_flight: None,
            last_request: 0,
            detail: None,
            dirty: false,
        }
    }
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with filters; the first `Refresh` queries with them.
    pub fn with_filters(filters: FilterSet) -> Self {
        Self {
            filters: filters.normalized(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> DirectoryViewModel {
        DirectoryViewModel::from_state(self)
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn items(&self) -> &[ProfessionalRecord] {
        &self.items
    }

    pub fn seen_ids(&self) -> &HashSet<MemberId> {
        &self.seen_ids
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    /// Request id of the page fetch currently awaited, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.in_flight.map(|in_flight| in_flight.request)
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn begin_load(&mut self, filters: FilterSet) -> Effect {
        let normalized = filters.normalized();
        if !normalized.is_empty() {
            self.filters = normalized;
        }

        if let Some(previous) = self.in_flight {
            dir_debug!("load supersedes in-flight request {}", previous.request);
        }

        self.items.clear();
        self.seen_ids.clear();
        self.page = 1;
        self.window_size = PAGE_SIZE;
        self.phase = Phase::Loading;
        self.error = None;
        self.has_more = false;
        self.dirty = true;

        let request = self.next_request();
        self.in_flight = Some(InFlight {
            request,
            kind: FetchKind::Reset,
        });
        dir_info!(
            "load request={} filters={:?} window={}",
            request,
            self.filters,
            self.window_size
        );

        Effect::FetchProfessionals {
            request,
            filters: self.filters.clone(),
            window_size: self.window_size,
        }
    }

    pub(crate) fn begin_load_more(&mut self) -> Option<Effect> {
        if self.is_loading() {
            dir_debug!("load_more skipped: a fetch is already in flight");
            return None;
        }
        if self.filters.is_single_entity() {
            if self.has_more {
                self.has_more = false;
                self.dirty = true;
            }
            return None;
        }
        if !self.has_more {
            return None;
        }

        self.page += 1;
        self.window_size = self.page * PAGE_SIZE;
        self.phase = Phase::Loading;
        self.error = None;
        self.dirty = true;

        let request = self.next_request();
        self.in_flight = Some(InFlight {
            request,
            kind: FetchKind::Extend,
        });
        dir_info!(
            "load_more request={} page={} window={}",
            request,
            self.page,
            self.window_size
        );

        Some(Effect::FetchProfessionals {
            request,
            filters: self.filters.clone(),
            window_size: self.window_size,
        })
    }

    pub(crate) fn apply_page(&mut self, request: RequestId, result: Result<ResultPage, LoadError>) {
        let Some(in_flight) = self.in_flight.filter(|pending| pending.request == request) else {
            dir_debug!("discarding stale page response for request {}", request);
            return;
        };
        self.in_flight = None;
        self.dirty = true;

        match result {
            Ok(page) => {
                self.phase = Phase::Ready;
                match in_flight.kind {
                    FetchKind::Reset => self.apply_first_page(page),
                    FetchKind::Extend => self.apply_next_page(page),
                }
            }
            Err(err) => {
                dir_warn!("request {} failed: {}", request, err);
                self.phase = Phase::Failed;
                self.error = Some(err);
                if in_flight.kind == FetchKind::Reset {
                    self.has_more = false;
                }
            }
        }
    }

    fn apply_first_page(&mut self, page: ResultPage) {
        match page {
            ResultPage::Single(record) => {
                self.append_unseen(vec![record]);
                self.has_more = false;
            }
            ResultPage::Many(records) => {
                let received = records.len();
                self.append_unseen(records);
                self.has_more =
                    !self.filters.is_single_entity() && received >= self.window_size;
            }
            ResultPage::Empty => {
                dir_info!("no professionals found for {:?}", self.filters);
                self.has_more = false;
            }
        }
    }

    fn apply_next_page(&mut self, page: ResultPage) {
        match page {
            ResultPage::Many(records) => {
                let received = records.len();
                let added = self.append_unseen(records);
                dir_debug!(
                    "window {} returned {} records, {} new",
                    self.window_size,
                    received,
                    added
                );
                self.has_more = added > 0 && received >= self.window_size;
            }
            ResultPage::Single(_) | ResultPage::Empty => {
                self.has_more = false;
            }
        }
    }

    /// Appends records whose ids are unseen, in arrival order. Returns how
    /// many were added.
    fn append_unseen(&mut self, records: Vec<ProfessionalRecord>) -> usize {
        let before = self.items.len();
        for record in records {
            if self.seen_ids.insert(record.id().clone()) {
                self.items.push(record);
            }
        }
        self.items.len() - before
    }

    pub(crate) fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            if self.phase == Phase::Failed {
                self.phase = Phase::Ready;
            }
            self.dirty = true;
        }
    }

    pub(crate) fn open_detail(&mut self, member_id: &MemberId) -> Option<Effect> {
        if let Some(panel) = &self.detail {
            if panel.member_id() == member_id && panel.experiences().is_started() {
                return None;
            }
        }

        let Some(record) = self.items.iter().find(|record| record.id() == member_id) else {
            dir_warn!("detail requested for unknown member {}", member_id);
            return None;
        };

        let mut panel = DetailPanel::new(record.clone());
        let request = self.next_request();
        panel.begin_fetch(request);
        self.detail = Some(panel);
        self.dirty = true;
        dir_debug!("experiences request={} member={}", request, member_id);

        Some(Effect::FetchExperiences {
            request,
            member_id: member_id.clone(),
        })
    }

    pub(crate) fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn apply_experiences(
        &mut self,
        request: RequestId,
        result: Result<Vec<ExperienceRecord>, LoadError>,
    ) {
        let Some(panel) = self.detail.as_mut() else {
            dir_debug!("discarding experiences for closed detail (request {})", request);
            return;
        };
        let result = result.map_err(|err| {
            dir_warn!("experiences for {} failed: {}", panel.member_id(), err);
            err.to_string()
        });
        if panel.complete_fetch(request, result) {
            self.dirty = true;
        } else {
            dir_debug!("discarding stale experiences response {}", request);
        }
    }
}
