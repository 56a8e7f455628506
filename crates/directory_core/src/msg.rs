#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the filter form (full reset).
    FiltersSubmitted(crate::FilterSet),
    /// Repeat the last query from the first page.
    Refresh,
    /// The end of the list came into view.
    MoreRequested,
    /// Completion of a `FetchProfessionals` effect.
    PageLoaded {
        request: crate::RequestId,
        result: Result<crate::ResultPage, crate::LoadError>,
    },
    /// User opened the detail view of a listed professional.
    DetailOpened(crate::MemberId),
    DetailClosed,
    /// Completion of a `FetchExperiences` effect.
    ExperiencesLoaded {
        request: crate::RequestId,
        result: Result<Vec<crate::ExperienceRecord>, crate::LoadError>,
    },
    /// User dismissed the page-level error panel.
    ErrorDismissed,
}
