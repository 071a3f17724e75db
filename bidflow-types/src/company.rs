use crate::tender::Sector;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Closed catalogue of past-project value buckets offered by the profile
/// wizard. The value-range parser understands exactly these shapes.
pub const PROJECT_VALUE_RANGES: [&str; 6] = [
    "Under 50k",
    "50k - 100k",
    "100k - 250k",
    "250k - 500k",
    "500k - 1M",
    "Over 1M",
];

/// A company profile. One company per owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub sectors: Vec<Sector>,
    /// Free-text capability tags; matched case-insensitively by the scorer.
    pub capability_tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A past project, used by the relevance scorer's value-proximity term.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub sector: Sector,
    /// Bucketed value range string, e.g. "50k - 100k".
    pub value_range: String,
    pub year_completed: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub issuing_body: String,
}

/// Company with its relations loaded, as consumed by the relevance scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(flatten)]
    pub company: Company,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}
