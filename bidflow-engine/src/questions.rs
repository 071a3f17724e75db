use bidflow_types::{Question, QuestionKind, Sector, TenderRequirements};

/// Stable question ids. Single source of truth shared by the generator and
/// the section catalogue so the coverage invariant cannot drift silently.
pub mod ids {
    pub const COMPANY_OVERVIEW: &str = "company_overview";
    pub const PROPOSED_APPROACH: &str = "proposed_approach";
    pub const TIMELINE: &str = "timeline";
    pub const BUDGET_NOTES: &str = "budget_notes";
    pub const CAPABILITY_MATCH: &str = "capability_match";
    pub const CERTIFICATIONS: &str = "certifications";
    pub const RELEVANT_EXPERIENCE: &str = "relevant_experience";
    pub const TECHNICAL_APPROACH: &str = "technical_approach";
    pub const DELIVERABLES_PLAN: &str = "deliverables_plan";

    /// Every id the generator can ever produce, in generation order.
    pub const ALL: [&str; 9] = [
        COMPANY_OVERVIEW,
        PROPOSED_APPROACH,
        TIMELINE,
        BUDGET_NOTES,
        CAPABILITY_MATCH,
        CERTIFICATIONS,
        RELEVANT_EXPERIENCE,
        TECHNICAL_APPROACH,
        DELIVERABLES_PLAN,
    ];
}

/// The four fixed options of the certification status select, in display
/// order. The experience template branches on these exact strings.
pub const CERTIFICATION_OPTIONS: [&str; 4] = [
    "Yes - We have all required certifications",
    "Some - We have some certifications",
    "None but willing - We do not have certifications but are willing to obtain them",
    "No",
];

/// Generate the questionnaire for a tender from its parsed requirements.
///
/// Always emits the four baseline questions first, then one conditional
/// question per non-empty requirement list in fixed field order
/// (tags, certifications, experience, technical, deliverables). Yields
/// between 4 and 9 questions. Title and sector are accepted as context for
/// future prompt tailoring but do not alter the output today.
pub fn generate_questions(
    requirements: &TenderRequirements,
    _tender_title: &str,
    _tender_sector: Sector,
) -> Vec<Question> {
    let mut questions = Vec::new();

    questions.push(Question {
        id: ids::COMPANY_OVERVIEW.into(),
        text: "Company Overview".into(),
        kind: QuestionKind::Textarea,
        required: true,
        options: None,
        help_text: Some(
            "Provide a brief overview of your company and why you are qualified for this tender."
                .into(),
        ),
    });

    questions.push(Question {
        id: ids::PROPOSED_APPROACH.into(),
        text: "Proposed Approach".into(),
        kind: QuestionKind::Textarea,
        required: true,
        options: None,
        help_text: Some("Describe your approach to delivering this project.".into()),
    });

    questions.push(Question {
        id: ids::TIMELINE.into(),
        text: "Proposed Timeline".into(),
        kind: QuestionKind::Text,
        required: true,
        options: None,
        help_text: Some(
            "Provide your estimated timeline for project completion (e.g., \"12 weeks\", \"3 months\")."
                .into(),
        ),
    });

    questions.push(Question {
        id: ids::BUDGET_NOTES.into(),
        text: "Budget Notes".into(),
        kind: QuestionKind::Textarea,
        required: false,
        options: None,
        help_text: Some("Optional: Add any notes about your budget or pricing approach.".into()),
    });

    if let Some(tags) = non_empty(&requirements.tags) {
        questions.push(Question {
            id: ids::CAPABILITY_MATCH.into(),
            text: "Capability Match".into(),
            kind: QuestionKind::Textarea,
            required: true,
            options: None,
            help_text: Some(format!(
                "This tender requires the following capabilities: {}. Explain how your company's capabilities align with these requirements.",
                tags.join(", ")
            )),
        });
    }

    if let Some(certifications) = non_empty(&requirements.certifications) {
        questions.push(Question {
            id: ids::CERTIFICATIONS.into(),
            text: "Certification Status".into(),
            kind: QuestionKind::Select,
            required: true,
            options: Some(CERTIFICATION_OPTIONS.iter().map(|s| s.to_string()).collect()),
            help_text: Some(format!(
                "Required certifications: {}",
                certifications.join(", ")
            )),
        });
    }

    if let Some(experience) = non_empty(&requirements.experience) {
        questions.push(Question {
            id: ids::RELEVANT_EXPERIENCE.into(),
            text: "Relevant Experience".into(),
            kind: QuestionKind::Textarea,
            required: true,
            options: None,
            help_text: Some(format!(
                "This tender requires experience in: {}. Describe your relevant experience in these areas.",
                experience.join(", ")
            )),
        });
    }

    if let Some(technical) = non_empty(&requirements.technical) {
        questions.push(Question {
            id: ids::TECHNICAL_APPROACH.into(),
            text: "Technical Approach".into(),
            kind: QuestionKind::Textarea,
            required: true,
            options: None,
            help_text: Some(format!(
                "Technical requirements: {}. Explain your technical approach to meeting these requirements.",
                technical.join(", ")
            )),
        });
    }

    if let Some(deliverables) = non_empty(&requirements.deliverables) {
        questions.push(Question {
            id: ids::DELIVERABLES_PLAN.into(),
            text: "Deliverables Plan".into(),
            kind: QuestionKind::Textarea,
            required: true,
            options: None,
            help_text: Some(format!(
                "Expected deliverables: {}. Outline your plan for delivering these items.",
                deliverables.join(", ")
            )),
        });
    }

    questions
}

fn non_empty(field: &Option<Vec<String>>) -> Option<&Vec<String>> {
    field.as_ref().filter(|list| !list.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidflow_types::QuestionKind;

    fn baseline_ids() -> Vec<&'static str> {
        vec![
            ids::COMPANY_OVERVIEW,
            ids::PROPOSED_APPROACH,
            ids::TIMELINE,
            ids::BUDGET_NOTES,
        ]
    }

    #[test]
    fn empty_requirements_yield_the_four_baseline_questions() {
        let questions =
            generate_questions(&TenderRequirements::default(), "Any Tender", Sector::It);
        let question_ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(question_ids, baseline_ids());
        assert!(!questions[3].required, "budget_notes is optional");
        assert!(questions[..3].iter().all(|q| q.required));
    }

    #[test]
    fn all_requirement_fields_yield_nine_questions_in_fixed_order() {
        let requirements = TenderRequirements {
            tags: Some(vec!["Cloud Services".into()]),
            certifications: Some(vec!["ISO 27001".into()]),
            experience: Some(vec!["Healthcare IT".into()]),
            technical: Some(vec!["FHIR APIs".into()]),
            deliverables: Some(vec!["Source code".into()]),
        };
        let questions = generate_questions(&requirements, "Any Tender", Sector::It);
        let question_ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(question_ids, ids::ALL);
    }

    #[test]
    fn empty_lists_are_treated_as_absent() {
        let requirements = TenderRequirements {
            tags: Some(vec![]),
            certifications: None,
            experience: Some(vec![]),
            technical: None,
            deliverables: Some(vec![]),
        };
        let questions = generate_questions(&requirements, "Any Tender", Sector::Construction);
        assert_eq!(questions.len(), 4);
    }

    #[test]
    fn help_text_interpolates_requirement_lists_verbatim() {
        let requirements = TenderRequirements {
            tags: Some(vec!["Cloud Migration".into(), "Cybersecurity".into()]),
            certifications: Some(vec!["ISO 27001".into(), "Cyber Essentials".into()]),
            ..Default::default()
        };
        let questions = generate_questions(&requirements, "Any Tender", Sector::It);

        let capability = questions.iter().find(|q| q.id == ids::CAPABILITY_MATCH).unwrap();
        assert!(capability
            .help_text
            .as_deref()
            .unwrap()
            .contains("Cloud Migration, Cybersecurity"));

        let certs = questions.iter().find(|q| q.id == ids::CERTIFICATIONS).unwrap();
        assert_eq!(
            certs.help_text.as_deref(),
            Some("Required certifications: ISO 27001, Cyber Essentials")
        );
        assert_eq!(certs.kind, QuestionKind::Select);
        assert_eq!(certs.options.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn scenario_technical_and_experience_yield_six_questions() {
        let requirements = TenderRequirements {
            technical: Some(vec!["Cloud-native architecture".into()]),
            experience: Some(vec!["Healthcare IT".into()]),
            ..Default::default()
        };
        let questions = generate_questions(&requirements, "NHS Platform", Sector::It);
        let question_ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(
            question_ids,
            vec![
                ids::COMPANY_OVERVIEW,
                ids::PROPOSED_APPROACH,
                ids::TIMELINE,
                ids::BUDGET_NOTES,
                ids::RELEVANT_EXPERIENCE,
                ids::TECHNICAL_APPROACH,
            ]
        );
    }

    #[test]
    fn question_count_is_bounded() {
        let full = TenderRequirements {
            tags: Some(vec!["a".into()]),
            certifications: Some(vec!["b".into()]),
            experience: Some(vec!["c".into()]),
            technical: Some(vec!["d".into()]),
            deliverables: Some(vec!["e".into()]),
        };
        assert_eq!(
            generate_questions(&full, "t", Sector::It).len(),
            9
        );
        assert_eq!(
            generate_questions(&TenderRequirements::default(), "t", Sector::It).len(),
            4
        );
    }
}
