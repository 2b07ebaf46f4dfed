//! Domain errors for the issue-mirror pipeline.

use std::time::Duration;

use thiserror::Error;

/// Domain-level errors that can occur while mirroring issues.
///
/// Only [`DomainError::InvalidConfiguration`] and
/// [`DomainError::InvalidPromptTemplate`] are fatal; every other variant is
/// scoped to a single issue or a single poll cycle and is retried naturally
/// on the next scheduled cycle.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Prompt template must contain exactly one {{content}} placeholder, found {0}")]
    InvalidPromptTemplate(usize),

    #[error("Source tracker unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Summary generation failed: {0}")]
    GenerationFailed(String),

    #[error("Summary generation timed out after {0:?}")]
    GenerationTimedOut(Duration),

    #[error("Mirror creation failed: {0}")]
    MirrorCreateFailed(String),

    #[error("Back-link update failed: {0}")]
    LinkBackFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Convenience alias used throughout the crate.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl DomainError {
    /// Whether this error is fatal at process startup rather than
    /// recoverable on a later cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidConfiguration(_) | DomainError::InvalidPromptTemplate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_template_error_message_includes_count() {
        let err = DomainError::InvalidPromptTemplate(2);
        assert!(err.to_string().contains("found 2"));
        assert!(err.to_string().contains("{content}"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(DomainError::InvalidConfiguration("x".into()).is_fatal());
        assert!(DomainError::InvalidPromptTemplate(0).is_fatal());
        assert!(!DomainError::SourceUnavailable("x".into()).is_fatal());
        assert!(!DomainError::GenerationTimedOut(Duration::from_secs(30)).is_fatal());
        assert!(!DomainError::LinkBackFailed("x".into()).is_fatal());
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: DomainError = parse_err.into();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
