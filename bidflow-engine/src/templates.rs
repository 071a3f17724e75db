use crate::error::EngineError;
use crate::questions::ids;
use serde_json::{Map, Value};

/// Context threaded into every section template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub tender_title: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
}

/// Render one section's narrative from the answer subset and context.
///
/// Every template substitutes 1-2 answers into a fixed prose skeleton and
/// falls back to a generic sentence when an answer is absent or empty; the
/// output never contains raw placeholders. Unknown section ids are the one
/// hard error in the expansion path.
pub fn expand_section(
    section_id: &str,
    answers: &Map<String, Value>,
    context: &TemplateContext,
) -> Result<String, EngineError> {
    match section_id {
        "executive_summary" => Ok(executive_summary(answers, context)),
        "technical_approach" => Ok(technical_approach(answers)),
        "methodology" => Ok(methodology(answers)),
        "timeline" => Ok(timeline(answers)),
        "experience" => Ok(experience(answers)),
        "budget" => Ok(budget(answers)),
        other => Err(EngineError::UnknownSection(other.to_string())),
    }
}

/// Answer text for a question id; empty string when absent, null, or empty.
fn answer_text(answers: &Map<String, Value>, id: &str) -> String {
    match answers.get(id) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn or_fallback(text: String, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

fn executive_summary(answers: &Map<String, Value>, context: &TemplateContext) -> String {
    let overview = or_fallback(
        answer_text(answers, ids::COMPANY_OVERVIEW),
        "We are a dedicated organization with a proven track record of delivering high-quality solutions.",
    );
    let approach = or_fallback(
        answer_text(answers, ids::PROPOSED_APPROACH),
        "Our approach prioritizes client collaboration, technical excellence, and measurable outcomes.",
    );
    let company = context
        .company_name
        .as_deref()
        .unwrap_or("Our organization");
    let sector = context.sector.as_deref().unwrap_or("this domain");

    format!(
        r#"# Executive Summary

{company} is pleased to submit this proposal for {title}.

## Company Overview
{overview}

## Proposed Solution
{approach}

## Value Proposition
We bring extensive experience in {sector} with a commitment to delivering exceptional results on time and within budget. Our approach is built on transparency, innovation, and a deep understanding of client needs."#,
        title = context.tender_title,
    )
}

fn technical_approach(answers: &Map<String, Value>) -> String {
    let technical = or_fallback(
        answer_text(answers, ids::TECHNICAL_APPROACH),
        "Our technical methodology combines industry best practices with innovative solutions tailored to your specific requirements.",
    );
    let capability = or_fallback(
        answer_text(answers, ids::CAPABILITY_MATCH),
        "Our team possesses the necessary technical capabilities and expertise to deliver this project successfully.",
    );

    format!(
        r#"# Technical Approach

## Overview
{technical}

## Capability Alignment
{capability}

## Technology & Methodology
We propose a robust, scalable approach that prioritizes security, performance, and maintainability. Our technical strategy includes:

- Comprehensive requirements analysis and documentation
- Iterative development with regular stakeholder feedback
- Rigorous testing and quality assurance protocols
- Seamless deployment and knowledge transfer

Our proven processes ensure that technical challenges are identified early and addressed systematically throughout the project lifecycle."#
    )
}

fn methodology(answers: &Map<String, Value>) -> String {
    let approach = or_fallback(
        answer_text(answers, ids::PROPOSED_APPROACH),
        "Our methodology is designed to maximize collaboration, minimize risk, and ensure predictable outcomes. We follow a structured approach that adapts to your specific needs.",
    );
    let deliverables = or_fallback(
        answer_text(answers, ids::DELIVERABLES_PLAN),
        "All project deliverables will be clearly documented, thoroughly tested, and delivered according to the agreed timeline. Each deliverable includes comprehensive documentation and support.",
    );

    format!(
        r#"# Methodology & Delivery

## Project Methodology
{approach}

## Deliverables
{deliverables}

## Quality Assurance
Our quality assurance framework includes:
- Regular code reviews and technical audits
- Comprehensive testing at every stage (unit, integration, and acceptance)
- Client review and approval gates at key milestones
- Post-delivery support and continuous optimization

We maintain rigorous standards throughout the project to ensure that every deliverable meets or exceeds expectations."#
    )
}

fn timeline(answers: &Map<String, Value>) -> String {
    let timeline = or_fallback(
        answer_text(answers, ids::TIMELINE),
        "We will work with you to establish a timeline that meets your requirements while ensuring quality delivery.",
    );

    format!(
        r#"# Project Timeline

## Proposed Duration
{timeline}

## Key Milestones
We propose the following project phases with clearly defined checkpoints:

1. **Discovery & Planning** - Requirements gathering, stakeholder interviews, project planning and scope finalization
2. **Design & Architecture** - Technical specification, architecture design, prototype development and review
3. **Development & Testing** - Iterative development, quality assurance, client feedback integration and refinement
4. **Deployment & Handover** - Production deployment, comprehensive documentation, knowledge transfer, and team training

Each phase includes defined deliverables and client approval checkpoints to ensure continuous alignment with your expectations. We maintain transparent communication throughout, providing regular progress updates and adapting to any changing requirements."#
    )
}

/// The compliance sentence branches on the exact selected option string of
/// the certification select; each branch makes materially different claims.
fn certification_text(selected: &str) -> &'static str {
    match selected {
        "Yes - We have all required certifications" => {
            "We hold all required certifications specified in the tender requirements."
        }
        "Some - We have some certifications" => {
            "We hold several relevant certifications and are committed to obtaining any additional credentials required for this project."
        }
        "None but willing - We do not have certifications but are willing to obtain them" => {
            "We are committed to obtaining all necessary certifications to meet tender requirements and ensure full compliance."
        }
        "No" => {
            "While we may not hold all specified certifications, our proven track record and technical expertise demonstrate our capability to deliver exceptional results."
        }
        _ => "We maintain relevant professional certifications and industry credentials.",
    }
}

fn experience(answers: &Map<String, Value>) -> String {
    let relevant = or_fallback(
        answer_text(answers, ids::RELEVANT_EXPERIENCE),
        "Our team has successfully delivered numerous projects in similar domains, demonstrating consistent expertise and reliability. We bring a deep understanding of industry challenges and proven solutions.",
    );
    let certifications = certification_text(&answer_text(answers, ids::CERTIFICATIONS));

    format!(
        r#"# Relevant Experience

## Project Experience
{relevant}

## Certifications & Credentials
{certifications}

## Track Record
Our portfolio demonstrates consistent delivery of high-quality solutions across diverse client engagements. We are committed to maintaining the highest professional standards and continually investing in our team's capabilities.

## References
We are happy to provide detailed case studies and client references upon request."#
    )
}

fn budget(answers: &Map<String, Value>) -> String {
    let notes = or_fallback(
        answer_text(answers, ids::BUDGET_NOTES),
        "Our pricing approach is transparent, competitive, and designed to deliver maximum value for your investment.",
    );

    format!(
        r#"# Budget Considerations

{notes}

## Cost Structure
We provide detailed, itemized pricing that includes:
- All labor and professional services
- Technology and infrastructure costs
- Project management and quality assurance
- Post-delivery support period

Our pricing is structured to provide clarity and predictability, with no hidden fees or unexpected charges. We believe in transparent budgeting that aligns with the value delivered at each project stage.

## Value Delivery
Beyond competitive pricing, we focus on delivering measurable value through efficient processes, proactive risk management, and a commitment to exceeding expectations within the agreed budget parameters."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::CERTIFICATION_OPTIONS;
    use crate::sections::BID_SECTIONS;
    use serde_json::json;

    fn ctx() -> TemplateContext {
        TemplateContext {
            tender_title: "Digital Transformation Platform for NHS Trust".into(),
            company_name: None,
            sector: None,
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn unknown_section_id_is_a_hard_error() {
        let err = expand_section("appendix", &Map::new(), &ctx()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownSection(id) if id == "appendix"));
    }

    #[test]
    fn every_catalogue_section_expands() {
        for section in &BID_SECTIONS {
            let text = expand_section(section.id, &Map::new(), &ctx()).unwrap();
            assert!(text.starts_with("# "), "{} lacks a heading", section.id);
        }
    }

    #[test]
    fn answers_are_substituted_into_the_skeleton() {
        let all = answers(&[
            ("company_overview", "TechBuild delivers public-sector IT."),
            ("proposed_approach", "Phased agile rollout."),
        ]);
        let text = expand_section("executive_summary", &all, &ctx()).unwrap();
        assert!(text.contains("TechBuild delivers public-sector IT."));
        assert!(text.contains("Phased agile rollout."));
        assert!(text.contains("Digital Transformation Platform for NHS Trust"));
    }

    #[test]
    fn output_never_contains_raw_placeholders() {
        for section in &BID_SECTIONS {
            let text = expand_section(section.id, &Map::new(), &ctx()).unwrap();
            assert!(!text.contains("undefined"), "{}", section.id);
            assert!(!text.contains("{}"), "{}", section.id);
            assert!(!text.is_empty());
        }
    }

    #[test]
    fn context_fallbacks_apply() {
        let text = expand_section("executive_summary", &Map::new(), &ctx()).unwrap();
        assert!(text.contains("Our organization is pleased to submit"));
        assert!(text.contains("extensive experience in this domain"));

        let full_ctx = TemplateContext {
            tender_title: "Bridge Refurbishment".into(),
            company_name: Some("TechBuild Solutions Ltd.".into()),
            sector: Some("Construction".into()),
        };
        let text = expand_section("executive_summary", &Map::new(), &full_ctx).unwrap();
        assert!(text.contains("TechBuild Solutions Ltd. is pleased to submit"));
        assert!(text.contains("extensive experience in Construction"));
    }

    #[test]
    fn certification_branches_produce_distinct_compliance_claims() {
        let mut seen = std::collections::HashSet::new();
        for option in CERTIFICATION_OPTIONS {
            let all = answers(&[("certifications", option)]);
            let text = expand_section("experience", &all, &ctx()).unwrap();
            assert!(seen.insert(text), "duplicate wording for {option}");
        }
        // Unknown selection falls back to the default credential sentence
        let text = expand_section("experience", &answers(&[("certifications", "Maybe")]), &ctx())
            .unwrap();
        assert!(text.contains("We maintain relevant professional certifications"));
    }

    #[test]
    fn full_certification_option_claims_full_compliance() {
        let all = answers(&[("certifications", "Yes - We have all required certifications")]);
        let text = expand_section("experience", &all, &ctx()).unwrap();
        assert!(text.contains("We hold all required certifications specified in the tender requirements."));
    }
}
