//! Summary request and streaming-event models.

use crate::domain::errors::{DomainError, DomainResult};

/// Substitution point a prompt template must contain exactly once.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Built-in prompt template used when no custom template is configured.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Please analyze this GitHub issue description and create a clear, structured summary for Jira:

{content}

Please format the response as follows:
1. Issue Overview (1-2 sentences)
2. Key Details (bullet points)
3. Technical Requirements (if any)
4. Dependencies and Impact (if mentioned)
";

/// A single summarization request: a prompt template plus the raw content
/// to substitute into it. Constructed per issue and discarded after use.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Template with exactly one [`CONTENT_PLACEHOLDER`].
    pub template: String,
    /// Raw issue text. May be empty.
    pub content: String,
}

impl SummaryRequest {
    /// Build a request, substituting the default template when `template`
    /// is empty.
    pub fn new(content: impl Into<String>, template: impl Into<String>) -> Self {
        let template = template.into();
        let template = if template.is_empty() {
            DEFAULT_PROMPT_TEMPLATE.to_string()
        } else {
            template
        };
        Self {
            template,
            content: content.into(),
        }
    }

    /// Render the final prompt.
    ///
    /// The template must contain the placeholder exactly once; zero or
    /// multiple occurrences are a configuration error, surfaced here at
    /// first use rather than silently truncating content.
    pub fn render(&self) -> DomainResult<String> {
        let occurrences = self.template.matches(CONTENT_PLACEHOLDER).count();
        if occurrences != 1 {
            return Err(DomainError::InvalidPromptTemplate(occurrences));
        }
        Ok(self.template.replacen(CONTENT_PLACEHOLDER, &self.content, 1))
    }
}

/// One element of the model's response stream.
///
/// The producer task pushes these over a channel in arrival order; the
/// consumer treats the sequence as a single well-ordered stream, so a data
/// fragment can never race an error or the end-of-stream signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEvent {
    /// An incremental piece of generated text.
    Fragment(String),
    /// The producer encountered an error; no further events follow.
    Error(String),
    /// Normal end of stream; the accumulated text is complete.
    Done,
}
