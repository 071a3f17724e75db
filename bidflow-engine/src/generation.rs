use crate::error::EngineError;
use crate::sections::{answers_for_section, BID_SECTIONS};
use crate::stream::{stream_section, GeneratorConfig};
use crate::templates::TemplateContext;
use chrono::Utc;
use futures_util::StreamExt;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// The assembled bid document: narrative text per section id plus the
/// RFC 3339 generation timestamp. The caller persists this in a single
/// write; partial progress is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub sections: BTreeMap<String, String>,
    pub generated_at: String,
}

/// Drive the mock stream once per section, strictly sequentially in
/// catalogue order, accumulating each section's full text. Section N+1
/// never starts before section N's stream closes.
///
/// Cancellation is cooperative: dropping the returned future drops the
/// in-flight chunk stream, and nothing of the partial result survives.
pub async fn generate_document(
    answers: &Map<String, Value>,
    context: &TemplateContext,
    config: &GeneratorConfig,
) -> Result<GeneratedDocument, EngineError> {
    config.validate()?;

    let mut sections = BTreeMap::new();
    for section in &BID_SECTIONS {
        let subset = answers_for_section(section, answers);
        let mut stream = stream_section(section.id, &subset, context, config)?;

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk);
        }

        debug!(section_id = section.id, chars = text.len(), "section generated");
        sections.insert(section.id.to_string(), text);
    }

    Ok(GeneratedDocument {
        sections,
        generated_at: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::expand_section;
    use serde_json::json;

    fn fast() -> GeneratorConfig {
        GeneratorConfig {
            initial_delay_ms: 1,
            chunk_delay_ms: 1,
            words_per_chunk: 5,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn generates_all_six_sections() {
        let answers: Map<String, Value> = [
            ("company_overview".to_string(), json!("TechBuild Solutions")),
            ("proposed_approach".to_string(), json!("Agile phases")),
            ("timeline".to_string(), json!("12 weeks")),
        ]
        .into_iter()
        .collect();
        let ctx = TemplateContext {
            tender_title: "NHS Platform".into(),
            ..Default::default()
        };

        let document = generate_document(&answers, &ctx, &fast()).await.unwrap();
        let section_ids: Vec<&str> = document.sections.keys().map(String::as_str).collect();
        assert_eq!(section_ids.len(), 6);
        for section in &BID_SECTIONS {
            assert!(document.sections.contains_key(section.id));
        }
        assert!(!document.generated_at.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn generated_text_matches_direct_expansion() {
        let answers: Map<String, Value> =
            [("timeline".to_string(), json!("16 weeks"))].into_iter().collect();
        let ctx = TemplateContext {
            tender_title: "Bridge Works".into(),
            ..Default::default()
        };

        let document = generate_document(&answers, &ctx, &fast()).await.unwrap();
        let subset: Map<String, Value> =
            [("timeline".to_string(), json!("16 weeks"))].into_iter().collect();
        let expected = expand_section("timeline", &subset, &ctx).unwrap();
        assert_eq!(document.sections["timeline"], expected);
        assert!(document.sections["timeline"].contains("16 weeks"));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_config_fails_before_any_section() {
        let config = GeneratorConfig {
            chunk_delay_ms: 0,
            ..Default::default()
        };
        let result =
            generate_document(&Map::new(), &TemplateContext::default(), &config).await;
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn timestamp_is_rfc3339() {
        let document = generate_document(&Map::new(), &TemplateContext::default(), &fast())
            .await
            .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&document.generated_at).is_ok());
    }
}
