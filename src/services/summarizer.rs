//! Summary generator: streaming consumption of the model endpoint.
//!
//! One generation call per issue. A producer task (spawned by the Ollama
//! client) pushes typed events over a channel; the consumer here blocks on
//! next-event-or-deadline, appends fragments in arrival order, and freezes
//! the result exactly once when the stream signals completion. Partial
//! output is never salvaged: producer errors and timeouts both discard the
//! accumulated text.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::adapters::ollama::OllamaClient;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{SummarizerConfig, SummaryEvent, SummaryRequest};
use crate::domain::ports::Summarizer;

/// Generates structured summaries from raw issue text.
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    client: OllamaClient,
    model: String,
    prompt_template: String,
    timeout: Duration,
}

impl SummaryGenerator {
    /// Construct the generator, building the model-endpoint client.
    ///
    /// Client construction failure is fatal here and is not retried.
    pub fn new(config: &SummarizerConfig) -> DomainResult<Self> {
        let client = OllamaClient::new(&config.base_url)?;
        tracing::debug!(model = %config.model, "Summary generator initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            prompt_template: config.prompt_template.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Generate a summary for `content` with an explicit prompt template.
    ///
    /// An empty `prompt_template` falls back to the configured template,
    /// and from there to the built-in default. The effective template must
    /// contain exactly one `{content}` placeholder.
    pub async fn generate(&self, content: &str, prompt_template: &str) -> DomainResult<String> {
        let template = if prompt_template.is_empty() {
            self.prompt_template.as_str()
        } else {
            prompt_template
        };

        let prompt = SummaryRequest::new(content, template).render()?;

        let rx = self.client.generate_stream(&self.model, &prompt);
        collect_stream(rx, self.timeout).await
    }
}

#[async_trait]
impl Summarizer for SummaryGenerator {
    async fn summarize(&self, content: &str) -> DomainResult<String> {
        self.generate(content, "").await
    }
}

/// Consume the event stream into the final summary string.
///
/// Returns `Ok` only after the producer signals normal completion. The
/// whole consumption is bounded by `limit`; when it elapses the receiver
/// is dropped, which cancels the producer at its next send.
pub(crate) async fn collect_stream(
    mut rx: mpsc::Receiver<SummaryEvent>,
    limit: Duration,
) -> DomainResult<String> {
    let outcome = tokio::time::timeout(limit, async {
        let mut text = String::new();
        loop {
            match rx.recv().await {
                Some(SummaryEvent::Fragment(fragment)) => text.push_str(&fragment),
                Some(SummaryEvent::Error(message)) => {
                    return Err(DomainError::GenerationFailed(message));
                }
                Some(SummaryEvent::Done) => return Ok(text),
                // Producer hung up without a terminal event.
                None => {
                    return Err(DomainError::GenerationFailed(
                        "model stream closed before signalling completion".to_string(),
                    ));
                }
            }
        }
    })
    .await;

    match outcome {
        Ok(result) => result,
        Err(_) => Err(DomainError::GenerationTimedOut(limit)),
    }
}
