use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity key of a professional (`data_member_id`).
///
/// The server sends it either as a JSON string or as an integer; both are
/// stored in their string form so `"42"` and `42` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMemberId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawMemberId::deserialize(deserializer)? {
            RawMemberId::Text(text) => MemberId(text),
            RawMemberId::Signed(value) => MemberId(value.to_string()),
            RawMemberId::Unsigned(value) => MemberId(value.to_string()),
        })
    }
}

/// One entry of the list endpoint. Only `data_member_id` carries identity;
/// everything else is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalRecord {
    pub data_member_id: MemberId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// May embed `[nl]` line markers.
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: Option<f64>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

impl ProfessionalRecord {
    /// A record carrying only its identity.
    pub fn with_id(id: impl Into<MemberId>) -> Self {
        Self {
            data_member_id: id.into(),
            name: None,
            headline: None,
            location: None,
            bio: None,
            score: None,
            linkedin_url: None,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.data_member_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub date_range: Option<String>,
    /// May embed `[nl]` line markers.
    #[serde(default)]
    pub description: Option<String>,
}

/// Decoded body of the list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPage {
    /// Exact `person_id` match.
    Single(ProfessionalRecord),
    /// Ordered records, at most the requested window.
    Many(Vec<ProfessionalRecord>),
    /// `data` missing, null, or an empty list.
    Empty,
}

impl ResultPage {
    pub fn len(&self) -> usize {
        match self {
            ResultPage::Single(_) => 1,
            ResultPage::Many(records) => records.len(),
            ResultPage::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScore>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScore::Number(value)) => Some(value),
        Some(RawScore::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    })
}
