//! # BidFlow Engine
//!
//! The decision core of the tender-bidding service: relevance scoring,
//! questionnaire generation, bid completeness validation, section mapping,
//! template expansion, and the simulated streaming generator.
//!
//! All pipeline functions are pure with respect to storage. Malformed but
//! well-typed input degrades to neutral values (score 0, empty lists)
//! rather than erroring; only an unknown section id and an invalid
//! generator configuration are hard errors.
//!
//! ## Example
//!
//! ```rust
//! use bidflow_engine::questions::generate_questions;
//! use bidflow_types::{Sector, TenderRequirements};
//!
//! let requirements = TenderRequirements::from_json(Some(r#"{"tags": ["Cloud Migration"]}"#));
//! let questions = generate_questions(&requirements, "Data Centre Relocation", Sector::It);
//! assert_eq!(questions.len(), 5); // 4 baseline + capability_match
//! ```

pub mod error;
pub mod generation;
pub mod questions;
pub mod scoring;
pub mod sections;
pub mod stream;
pub mod templates;
pub mod validation;
pub mod value_range;

pub use error::EngineError;
pub use generation::{generate_document, GeneratedDocument};
pub use questions::generate_questions;
pub use scoring::relevance_score;
pub use sections::{answers_for_section, coverage_gaps, section_by_id, BidSectionSpec, BID_SECTIONS};
pub use stream::{mock_stream, stream_section, GeneratorConfig};
pub use templates::{expand_section, TemplateContext};
pub use validation::{is_valid_transition, validate_completeness, Completeness};
pub use value_range::parse_value_range;
