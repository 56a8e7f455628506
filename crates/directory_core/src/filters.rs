use serde::{Deserialize, Serialize};

pub const COMPANY_QUERY_KEY: &str = "company_query";
pub const JOB_QUERY_KEY: &str = "job_query";
pub const PERSON_ID_KEY: &str = "person_id";

/// Query filters understood by the list endpoint.
///
/// `person_id` turns the query into an exact single-entity lookup; the server
/// ignores the other two keys when it is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, value: impl Into<String>) -> Self {
        self.company_query = Some(value.into());
        self
    }

    pub fn job(mut self, value: impl Into<String>) -> Self {
        self.job_query = Some(value.into());
        self
    }

    pub fn person(mut self, value: impl Into<String>) -> Self {
        self.person_id = Some(value.into());
        self
    }

    /// Trims every value and drops the ones left empty. An empty key is
    /// never sent to the server.
    pub fn normalized(self) -> Self {
        Self {
            company_query: normalize_value(self.company_query),
            job_query: normalize_value(self.job_query),
            person_id: normalize_value(self.person_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company_query.is_none() && self.job_query.is_none() && self.person_id.is_none()
    }

    /// True when the query resolves to at most one record and never paginates.
    pub fn is_single_entity(&self) -> bool {
        self.person_id.is_some()
    }

    /// Present keys as query pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            (COMPANY_QUERY_KEY, self.company_query.as_deref()),
            (JOB_QUERY_KEY, self.job_query.as_deref()),
            (PERSON_ID_KEY, self.person_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }
}

fn normalize_value(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_drops_blank_values() {
        let filters = FilterSet::new().company(" 1035 ").job("   ").person("");
        let normalized = filters.normalized();

        assert_eq!(normalized.company_query.as_deref(), Some("1035"));
        assert_eq!(normalized.job_query, None);
        assert_eq!(normalized.person_id, None);
        assert!(!normalized.is_single_entity());
    }

    #[test]
    fn query_pairs_skip_absent_keys() {
        let filters = FilterSet::new().job("Data Scientist").person("42");
        assert_eq!(
            filters.query_pairs(),
            vec![(JOB_QUERY_KEY, "Data Scientist"), (PERSON_ID_KEY, "42")]
        );
        assert!(FilterSet::new().query_pairs().is_empty());
    }
}
