use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Bid lifecycle states. Transitions are validated by the engine's status
/// machine; SUBMITTED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Draft,
    InReview,
    Finalized,
    Submitted,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Draft => "DRAFT",
            BidStatus::InReview => "IN_REVIEW",
            BidStatus::Finalized => "FINALIZED",
            BidStatus::Submitted => "SUBMITTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(BidStatus::Draft),
            "IN_REVIEW" => Some(BidStatus::InReview),
            "FINALIZED" => Some(BidStatus::Finalized),
            "SUBMITTED" => Some(BidStatus::Submitted),
            _ => None,
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-generation bid content: the original answers plus the generated
/// narrative per section and the generation timestamp (RFC 3339).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub answers: Map<String, Value>,
    pub sections: std::collections::BTreeMap<String, String>,
    pub generated_at: String,
}

/// Persisted bid content. Two shapes exist on disk: a flat answer map keyed
/// by question id, and the structured post-generation object. The structured
/// shape is recognised by its `answers` sub-object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BidContent {
    Generated(GeneratedContent),
    Answers(Map<String, Value>),
}

impl BidContent {
    /// The flat answer map, regardless of shape.
    pub fn answers(&self) -> &Map<String, Value> {
        match self {
            BidContent::Answers(map) => map,
            BidContent::Generated(generated) => &generated.answers,
        }
    }

    pub fn generated(&self) -> Option<&GeneratedContent> {
        match self {
            BidContent::Generated(generated) => Some(generated),
            BidContent::Answers(_) => None,
        }
    }
}

impl Default for BidContent {
    fn default() -> Self {
        BidContent::Answers(Map::new())
    }
}

/// A company's response to a tender. At most one bid per
/// (tender, company) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub tender_id: String,
    pub company_id: String,
    pub status: BidStatus,
    pub content: BidContent,
    pub created_at: i64,
    pub updated_at: i64,
}
