//! Ollama generate API wire models.
//!
//! The generate endpoint streams newline-delimited JSON chunks, each
//! carrying an incremental `response` fragment, until a chunk with
//! `done: true` closes the stream. Server-side failures arrive as a
//! chunk carrying an `error` field.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g. "mistral").
    pub model: String,
    /// The fully rendered prompt.
    pub prompt: String,
    /// Always true; the consumer assembles the fragments.
    pub stream: bool,
}

/// One newline-delimited chunk of the generate response stream.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateChunk {
    /// Incremental text fragment. Empty on the terminal chunk.
    #[serde(default)]
    pub response: String,
    /// True on the terminal chunk.
    #[serde(default)]
    pub done: bool,
    /// Present when the server reports a failure mid-stream.
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_chunk_deserialization() {
        let json = r#"{"model":"mistral","created_at":"2024-01-15T10:30:00Z","response":"Over","done":false}"#;
        let chunk: GenerateChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.response, "Over");
        assert!(!chunk.done);
        assert!(chunk.error.is_none());
    }

    #[test]
    fn test_terminal_chunk_deserialization() {
        // The final chunk carries timing stats the mirror ignores.
        let json = r#"{"model":"mistral","response":"","done":true,"total_duration":123456,"eval_count":42}"#;
        let chunk: GenerateChunk = serde_json::from_str(json).unwrap();
        assert!(chunk.done);
        assert!(chunk.response.is_empty());
    }

    #[test]
    fn test_error_chunk_deserialization() {
        let json = r#"{"error":"model 'mistral' not found"}"#;
        let chunk: GenerateChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.error.as_deref(), Some("model 'mistral' not found"));
    }

    #[test]
    fn test_request_serialization() {
        let req = GenerateRequest {
            model: "mistral".to_string(),
            prompt: "Summarize this".to_string(),
            stream: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "mistral");
        assert_eq!(value["stream"], true);
    }
}
