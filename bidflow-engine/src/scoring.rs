use crate::value_range::parse_value_range;
use bidflow_types::{CompanyProfile, Tender};

/// Weighted relevance score (0-100) for a tender against a company profile.
///
/// With at least one past project the weights are sector 40, value
/// proximity up to 20, capability-tag overlap up to 40. With zero projects
/// the value term is dropped and the whole score is recomputed on a 50/50
/// sector/tag split.
///
/// Never fails: a missing company scores 0, a malformed requirements
/// payload zeroes the tag term.
pub fn relevance_score(tender: &Tender, company: Option<&CompanyProfile>) -> u8 {
    let Some(company) = company else {
        return 0;
    };

    let tender_tags: Vec<String> = tender
        .parsed_requirements()
        .tags
        .unwrap_or_default()
        .iter()
        .map(|t| t.to_lowercase().trim().to_string())
        .collect();

    let sector_match = company.company.sectors.contains(&tender.sector);

    let score = if company.projects.is_empty() {
        // No projects: the value term's weight moves to sector (50) and tags (50)
        let mut score = 0.0;
        if sector_match {
            score += 50.0;
        }
        score += tag_overlap_score(&tender_tags, &company.company.capability_tags, 50.0);
        score
    } else {
        let mut score = 0.0;

        if sector_match {
            score += 40.0;
        }

        // Value proximity against the mean of parsed project value ranges
        let avg_project_value = company
            .projects
            .iter()
            .map(|p| parse_value_range(&p.value_range))
            .sum::<f64>()
            / company.projects.len() as f64;

        let percentage_diff = (tender.value as f64 - avg_project_value).abs() / avg_project_value;
        if percentage_diff <= 0.5 {
            score += 20.0;
        } else if percentage_diff <= 1.0 {
            score += 10.0;
        }

        score += tag_overlap_score(&tender_tags, &company.company.capability_tags, 40.0);
        score
    };

    score.clamp(0.0, 100.0).round() as u8
}

/// Fraction of tender tags present in the company's capability tags,
/// scaled to `weight`. No tags on either side is a neutral zero.
fn tag_overlap_score(tender_tags: &[String], capability_tags: &[String], weight: f64) -> f64 {
    if tender_tags.is_empty() || capability_tags.is_empty() {
        return 0.0;
    }

    let company_tags: Vec<String> = capability_tags
        .iter()
        .map(|t| t.to_lowercase().trim().to_string())
        .collect();
    let matching = tender_tags
        .iter()
        .filter(|tag| company_tags.contains(tag))
        .count();

    (matching as f64 / tender_tags.len() as f64) * weight
}
