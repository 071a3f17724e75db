use thiserror::Error;

/// Hard errors the engine can produce. Everything else degrades to a
/// neutral value instead of erroring.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A section id outside the static catalogue was requested.
    #[error("Unknown section ID: {0}")]
    UnknownSection(String),

    /// The streaming generator was configured with out-of-range values.
    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),
}
