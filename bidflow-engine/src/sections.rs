use crate::questions::ids;
use serde_json::{Map, Value};

/// One entry of the static bid document catalogue. `source_questions`
/// names the question ids whose answers feed the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidSectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub order: u8,
    pub source_questions: &'static [&'static str],
    pub required: bool,
}

/// The six document sections, in display/generation order. Every question
/// id the generator can produce appears in at least one section's source
/// list; `coverage_gaps` guards the invariant.
pub const BID_SECTIONS: [BidSectionSpec; 6] = [
    BidSectionSpec {
        id: "executive_summary",
        title: "Executive Summary",
        order: 1,
        source_questions: &[ids::COMPANY_OVERVIEW, ids::PROPOSED_APPROACH],
        required: true,
    },
    BidSectionSpec {
        id: "technical_approach",
        title: "Technical Approach",
        order: 2,
        source_questions: &[ids::TECHNICAL_APPROACH, ids::CAPABILITY_MATCH],
        required: true,
    },
    BidSectionSpec {
        id: "methodology",
        title: "Methodology & Delivery",
        order: 3,
        source_questions: &[ids::PROPOSED_APPROACH, ids::DELIVERABLES_PLAN],
        required: true,
    },
    BidSectionSpec {
        id: "timeline",
        title: "Project Timeline",
        order: 4,
        source_questions: &[ids::TIMELINE],
        required: true,
    },
    BidSectionSpec {
        id: "experience",
        title: "Relevant Experience",
        order: 5,
        source_questions: &[ids::RELEVANT_EXPERIENCE, ids::CERTIFICATIONS],
        required: false,
    },
    BidSectionSpec {
        id: "budget",
        title: "Budget Considerations",
        order: 6,
        source_questions: &[ids::BUDGET_NOTES],
        required: false,
    },
];

pub fn section_by_id(id: &str) -> Option<&'static BidSectionSpec> {
    BID_SECTIONS.iter().find(|s| s.id == id)
}

/// Project the full answer map down to the keys feeding one section.
/// Question ids absent from the map are skipped: conditional questions may
/// never have been generated for this tender.
pub fn answers_for_section(
    section: &BidSectionSpec,
    all_answers: &Map<String, Value>,
) -> Map<String, Value> {
    let mut section_answers = Map::new();
    for question_id in section.source_questions {
        if let Some(value) = all_answers.get(*question_id) {
            section_answers.insert((*question_id).to_string(), value.clone());
        }
    }
    section_answers
}

/// Generator question ids that no section consumes. Must stay empty; the
/// catalogue and the generator share the id constants precisely so this
/// cannot drift unnoticed.
pub fn coverage_gaps() -> Vec<&'static str> {
    ids::ALL
        .iter()
        .filter(|id| {
            !BID_SECTIONS
                .iter()
                .any(|section| section.source_questions.contains(id))
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_generated_question_feeds_a_section() {
        assert_eq!(coverage_gaps(), Vec::<&str>::new());
    }

    #[test]
    fn sections_are_declared_in_order() {
        let orders: Vec<u8> = BID_SECTIONS.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn projection_keeps_only_section_keys() {
        let all: Map<String, Value> = [
            ("company_overview", json!("We build platforms")),
            ("proposed_approach", json!("Agile")),
            ("timeline", json!("12 weeks")),
            ("budget_notes", json!("Fixed price")),
            ("technical_approach", json!("Cloud native")),
            ("relevant_experience", json!("NHS projects")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let exec = section_by_id("executive_summary").unwrap();
        let subset = answers_for_section(exec, &all);
        assert_eq!(subset.len(), 2);
        assert!(subset.contains_key("company_overview"));
        assert!(subset.contains_key("proposed_approach"));
    }

    #[test]
    fn absent_conditional_answers_are_skipped() {
        let all: Map<String, Value> = [("timeline".to_string(), json!("12 weeks"))]
            .into_iter()
            .collect();

        let experience = section_by_id("experience").unwrap();
        assert!(answers_for_section(experience, &all).is_empty());

        let timeline = section_by_id("timeline").unwrap();
        assert_eq!(answers_for_section(timeline, &all).len(), 1);
    }

    #[test]
    fn unknown_section_id_is_none() {
        assert!(section_by_id("appendix").is_none());
    }
}
