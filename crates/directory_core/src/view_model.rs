use crate::format::{score_label, split_line_markers, with_fallback};
use crate::{
    DetailPanel, DirectoryState, ExperienceLoad, ExperienceRecord, FilterSet, Phase,
    ProfessionalRecord,
};

const NO_HEADLINE: &str = "No headline available";
const NO_LOCATION: &str = "Location not specified";
const NO_BIOGRAPHY: &str = "No biography available";
const UNKNOWN_POSITION: &str = "Unknown Position";
const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Everything a renderer needs; computed from the state, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryViewModel {
    pub filters: FilterSet,
    pub phase: Phase,
    pub loading: bool,
    /// Page-level error panel text; replaces the card grid while set.
    pub error: Option<String>,
    pub cards: Vec<CardView>,
    pub has_more: bool,
    pub window_size: usize,
    /// "No professionals found".
    pub show_empty_notice: bool,
    /// "No more professionals to load".
    pub show_end_notice: bool,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub member_id: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub bio_lines: Vec<String>,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub member_id: String,
    pub name: String,
    pub headline: Option<String>,
    pub location: String,
    pub bio_lines: Vec<String>,
    pub score: String,
    pub linkedin_url: Option<String>,
    pub experiences: ExperiencesView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperiencesView {
    Loading,
    Failed(String),
    Empty,
    Entries(Vec<ExperienceRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceRow {
    pub title: String,
    pub company: String,
    pub date_range: Option<String>,
    pub description_lines: Vec<String>,
}

impl DirectoryViewModel {
    pub(crate) fn from_state(state: &DirectoryState) -> Self {
        let loading = state.is_loading();
        let error = state.error().map(ToString::to_string);
        let cards: Vec<CardView> = state.items().iter().map(CardView::from_record).collect();

        Self {
            filters: state.filters().clone(),
            phase: state.phase(),
            loading,
            show_empty_notice: cards.is_empty() && !loading && error.is_none(),
            show_end_notice: !cards.is_empty() && !loading && !state.has_more(),
            error,
            cards,
            has_more: state.has_more(),
            window_size: state.window_size(),
            detail: state.detail().map(DetailView::from_panel),
        }
    }
}

impl CardView {
    fn from_record(record: &ProfessionalRecord) -> Self {
        Self {
            member_id: record.id().to_string(),
            name: record.name.clone().unwrap_or_default(),
            headline: with_fallback(record.headline.as_deref(), NO_HEADLINE),
            location: with_fallback(record.location.as_deref(), NO_LOCATION),
            bio_lines: bio_lines(record),
            score: score_label(record.score),
        }
    }
}

impl DetailView {
    fn from_panel(panel: &DetailPanel) -> Self {
        let record = panel.record();
        let experiences = match panel.experiences() {
            ExperienceLoad::NotStarted | ExperienceLoad::Loading => ExperiencesView::Loading,
            ExperienceLoad::Failed(message) => ExperiencesView::Failed(message.clone()),
            ExperienceLoad::Loaded(records) if records.is_empty() => ExperiencesView::Empty,
            ExperienceLoad::Loaded(records) => {
                ExperiencesView::Entries(records.iter().map(ExperienceRow::from_record).collect())
            }
        };

        Self {
            member_id: record.id().to_string(),
            name: record.name.clone().unwrap_or_default(),
            headline: record.headline.clone().filter(|text| !text.trim().is_empty()),
            location: with_fallback(record.location.as_deref(), NO_LOCATION),
            bio_lines: bio_lines(record),
            score: score_label(record.score),
            linkedin_url: record.linkedin_url.clone(),
            experiences,
        }
    }
}

impl ExperienceRow {
    fn from_record(record: &ExperienceRecord) -> Self {
        Self {
            title: with_fallback(record.title.as_deref(), UNKNOWN_POSITION),
            company: with_fallback(record.company_name.as_deref(), UNKNOWN_COMPANY),
            date_range: record.date_range.clone().filter(|text| !text.trim().is_empty()),
            description_lines: split_line_markers(
                record.description.as_deref().unwrap_or_default(),
            ),
        }
    }
}

fn bio_lines(record: &ProfessionalRecord) -> Vec<String> {
    match record.bio.as_deref().map(str::trim) {
        Some(bio) if !bio.is_empty() => split_line_markers(bio),
        _ => vec![NO_BIOGRAPHY.to_string()],
    }
}
