use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Input widget for a questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Textarea,
    Number,
    Select,
}

/// A questionnaire item. Questions are ephemeral: regenerated from the
/// tender's requirements on every request, never persisted. Only answers
/// are stored, keyed by question id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}
