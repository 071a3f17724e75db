use bidflow_types::{BidStatus, Question};
use serde_json::{Map, Value};

/// Result of a bid completeness check. `missing_questions` carries the
/// prompt texts of unanswered required questions, used verbatim in
/// user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completeness {
    pub complete: bool,
    pub answered_count: usize,
    pub total_required: usize,
    pub missing_questions: Vec<String>,
}

/// Check whether every required question has a usable answer.
///
/// An answer counts as present iff it exists, is not null, is not the
/// empty string, and is not the numeric value 0.
pub fn validate_completeness(content: &Map<String, Value>, questions: &[Question]) -> Completeness {
    let mut answered_count = 0;
    let mut missing_questions = Vec::new();
    let mut total_required = 0;

    for question in questions.iter().filter(|q| q.required) {
        total_required += 1;
        if is_answered(content.get(&question.id)) {
            answered_count += 1;
        } else {
            missing_questions.push(question.text.clone());
        }
    }

    Completeness {
        complete: answered_count == total_required,
        answered_count,
        total_required,
        missing_questions,
    }
}

fn is_answered(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

/// Legal bid status transitions:
///
/// DRAFT -> IN_REVIEW
/// IN_REVIEW -> FINALIZED, DRAFT (back to edit)
/// FINALIZED -> SUBMITTED
/// SUBMITTED is terminal.
pub fn is_valid_transition(current: BidStatus, next: BidStatus) -> bool {
    matches!(
        (current, next),
        (BidStatus::Draft, BidStatus::InReview)
            | (BidStatus::InReview, BidStatus::Finalized)
            | (BidStatus::InReview, BidStatus::Draft)
            | (BidStatus::Finalized, BidStatus::Submitted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::generate_questions;
    use bidflow_types::{Sector, TenderRequirements};
    use serde_json::json;

    fn answers(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn all_required_answered_is_complete() {
        let questions = generate_questions(&TenderRequirements::default(), "t", Sector::It);
        let content = answers(&[
            ("company_overview", json!("We are a firm")),
            ("proposed_approach", json!("Agile delivery")),
            ("timeline", json!("12 weeks")),
        ]);
        let result = validate_completeness(&content, &questions);
        assert!(result.complete);
        assert_eq!(result.answered_count, 3);
        assert_eq!(result.total_required, 3);
        assert!(result.missing_questions.is_empty());
    }

    #[test]
    fn optional_questions_do_not_count() {
        let questions = generate_questions(&TenderRequirements::default(), "t", Sector::It);
        // budget_notes unanswered but optional
        let content = answers(&[
            ("company_overview", json!("x")),
            ("proposed_approach", json!("y")),
            ("timeline", json!("z")),
        ]);
        assert!(validate_completeness(&content, &questions).complete);
    }

    #[test]
    fn empty_string_null_and_numeric_zero_are_unanswered() {
        let questions = generate_questions(&TenderRequirements::default(), "t", Sector::It);
        let content = answers(&[
            ("company_overview", json!("")),
            ("proposed_approach", json!(null)),
            ("timeline", json!(0)),
        ]);
        let result = validate_completeness(&content, &questions);
        assert!(!result.complete);
        assert_eq!(result.answered_count, 0);
        assert_eq!(
            result.missing_questions,
            vec!["Company Overview", "Proposed Approach", "Proposed Timeline"]
        );
    }

    #[test]
    fn nonzero_number_and_boolean_count_as_answered() {
        let questions = generate_questions(&TenderRequirements::default(), "t", Sector::It);
        let content = answers(&[
            ("company_overview", json!(12)),
            ("proposed_approach", json!(true)),
            ("timeline", json!("8 weeks")),
        ]);
        assert!(validate_completeness(&content, &questions).complete);
    }

    #[test]
    fn complete_iff_no_missing_prompts() {
        let questions = generate_questions(&TenderRequirements::default(), "t", Sector::It);
        let result = validate_completeness(&Map::new(), &questions);
        assert_eq!(result.complete, result.missing_questions.is_empty());
        assert!(!result.complete);
    }

    #[test]
    fn transition_table() {
        use BidStatus::*;
        assert!(is_valid_transition(Draft, InReview));
        assert!(is_valid_transition(InReview, Finalized));
        assert!(is_valid_transition(InReview, Draft));
        assert!(is_valid_transition(Finalized, Submitted));

        assert!(!is_valid_transition(Draft, Finalized));
        assert!(!is_valid_transition(Draft, Submitted));
        assert!(!is_valid_transition(Finalized, Draft));
        for next in [Draft, InReview, Finalized, Submitted] {
            assert!(!is_valid_transition(Submitted, next));
        }
    }
}
