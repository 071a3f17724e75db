use crate::error::EngineError;
use crate::templates::{expand_section, TemplateContext};
use futures_util::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;

/// A finite, non-restartable sequence of text chunks. Dropping the stream
/// cancels it; the producer runs inside the stream itself, so nothing keeps
/// running unobserved.
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Timing parameters of the simulated generation stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Delay before the first chunk, simulating model "thinking".
    pub initial_delay_ms: u64,
    /// Delay between chunks.
    pub chunk_delay_ms: u64,
    /// Whitespace-delimited words per chunk.
    pub words_per_chunk: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 800,
            chunk_delay_ms: 80,
            words_per_chunk: 5,
        }
    }
}

impl GeneratorConfig {
    pub const MAX_INITIAL_DELAY_MS: u64 = 10_000;
    pub const MAX_CHUNK_DELAY_MS: u64 = 1_000;
    pub const MAX_WORDS_PER_CHUNK: usize = 100;

    /// Total latency is text length x per-chunk delay, so the delays must
    /// be positive and bounded before a stream is built.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.words_per_chunk == 0 || self.words_per_chunk > Self::MAX_WORDS_PER_CHUNK {
            return Err(EngineError::InvalidConfig(format!(
                "words_per_chunk must be between 1 and {}",
                Self::MAX_WORDS_PER_CHUNK
            )));
        }
        if self.chunk_delay_ms == 0 || self.chunk_delay_ms > Self::MAX_CHUNK_DELAY_MS {
            return Err(EngineError::InvalidConfig(format!(
                "chunk_delay_ms must be between 1 and {}",
                Self::MAX_CHUNK_DELAY_MS
            )));
        }
        if self.initial_delay_ms > Self::MAX_INITIAL_DELAY_MS {
            return Err(EngineError::InvalidConfig(format!(
                "initial_delay_ms must be at most {}",
                Self::MAX_INITIAL_DELAY_MS
            )));
        }
        Ok(())
    }
}

/// Split text into word groups. Every chunk except the last keeps its
/// trailing space so that concatenating all chunks reproduces the text
/// byte for byte.
fn chunk_words(text: &str, words_per_chunk: usize) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    let per = words_per_chunk.max(1);
    let mut chunks = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let end = (i + per).min(words.len());
        let mut chunk = words[i..end].join(" ");
        if end < words.len() {
            chunk.push(' ');
        }
        chunks.push(chunk);
        i = end;
    }

    chunks
}

/// Emit `text` as a progressively-arriving chunk stream with simulated
/// latency: wait `initial_delay_ms`, then one chunk per `chunk_delay_ms`.
/// The stream closes after the last chunk.
pub fn mock_stream(text: &str, config: &GeneratorConfig) -> TextStream {
    let chunks = chunk_words(text, config.words_per_chunk);
    let initial = Duration::from_millis(config.initial_delay_ms);
    let per_chunk = Duration::from_millis(config.chunk_delay_ms);

    let delays = std::iter::once(initial).chain(std::iter::repeat(per_chunk));
    let stream = stream::iter(chunks.into_iter().zip(delays)).then(|(chunk, delay)| async move {
        sleep(delay).await;
        chunk
    });

    Box::pin(stream)
}

/// Expand one section and stream its narrative. Unknown section ids and
/// invalid configs fail before any delay is incurred.
pub fn stream_section(
    section_id: &str,
    answers: &Map<String, Value>,
    context: &TemplateContext,
    config: &GeneratorConfig,
) -> Result<TextStream, EngineError> {
    config.validate()?;
    let full_text = expand_section(section_id, answers, context)?;
    Ok(mock_stream(&full_text, config))
}
