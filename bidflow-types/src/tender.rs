use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Industry sectors covered by the tender catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub enum Sector {
    #[serde(rename = "IT")]
    It,
    Construction,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::It => "IT",
            Sector::Construction => "Construction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IT" => Some(Sector::It),
            "Construction" => Some(Sector::Construction),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderStatus {
    Open,
    Closed,
    Awarded,
}

impl TenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenderStatus::Open => "OPEN",
            TenderStatus::Closed => "CLOSED",
            TenderStatus::Awarded => "AWARDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(TenderStatus::Open),
            "CLOSED" => Some(TenderStatus::Closed),
            "AWARDED" => Some(TenderStatus::Awarded),
            _ => None,
        }
    }
}

/// An attached tender document reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct TenderDocument {
    pub name: String,
    pub reference: String,
}

/// A public procurement opportunity. Immutable from the bidding side;
/// created by ingestion/seeding only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: String,
    pub title: String,
    pub description: String,
    pub value: i64,
    /// Epoch seconds.
    pub deadline: i64,
    pub sector: Sector,
    pub source: String,
    pub status: TenderStatus,
    /// Semi-structured requirements payload, stored as raw JSON text.
    pub requirements: Option<String>,
    pub documents: Option<Vec<TenderDocument>>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Tender {
    /// Parsed view of the requirements payload. Malformed JSON degrades to
    /// an empty requirements object, never an error.
    pub fn parsed_requirements(&self) -> TenderRequirements {
        TenderRequirements::from_json(self.requirements.as_deref())
    }
}

/// Optional requirement lists attached to a tender. All fields optional;
/// absent and empty are treated the same downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
pub struct TenderRequirements {
    pub tags: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub experience: Option<Vec<String>>,
    pub technical: Option<Vec<String>>,
    pub deliverables: Option<Vec<String>>,
}

impl TenderRequirements {
    /// Lenient parse: `None`, empty, or malformed JSON all yield the empty
    /// requirements object.
    pub fn from_json(raw: Option<&str>) -> Self {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }
}

/// Sort key for the tender list. Relevance is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Relevance,
    Deadline,
    Value,
}

/// Tender list filter parameters, deserialized from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenderFilters {
    pub sector: Option<Sector>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    /// ISO date lower bound on the deadline.
    pub deadline: Option<String>,
    pub sort: SortKey,
}

/// A tender decorated with the caller-specific relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderWithScore {
    #[serde(flatten)]
    pub tender: Tender,
    pub relevance_score: u8,
}
