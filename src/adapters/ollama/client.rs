//! Ollama streaming client.
//!
//! Issues one generate call per summary and relays the response chunks as
//! typed [`SummaryEvent`]s over a channel from a spawned producer task.
//! The consumer side (the summary generator service) owns ordering,
//! accumulation, and timeout handling; this module owns transport and
//! chunk parsing only.

use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tokio::sync::mpsc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::SummaryEvent;

use super::models::{GenerateChunk, GenerateRequest};

/// Capacity of the producer→consumer event channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Connect timeout for the generate call. The overall call duration is
/// bounded by the consumer's per-issue timeout, not here, so a healthy
/// stream is never cut off mid-generation.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Ollama generate endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the given base URL.
    ///
    /// Failure to construct the underlying HTTP connector is fatal to
    /// generator construction and is not retried.
    pub fn new(base_url: impl Into<String>) -> DomainResult<Self> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                DomainError::InvalidConfiguration(format!("Failed to create Ollama client: {e}"))
            })?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Start a generation call and return the receiving end of its event
    /// stream.
    ///
    /// A producer task is spawned to read the response; it pushes
    /// [`SummaryEvent::Fragment`]s in arrival order and terminates with
    /// exactly one [`SummaryEvent::Done`] or [`SummaryEvent::Error`].
    /// Dropping the receiver cancels the producer at its next send.
    pub fn generate_stream(&self, model: &str, prompt: &str) -> mpsc::Receiver<SummaryEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let http = self.http.clone();
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: true,
        };

        tokio::spawn(async move {
            produce_events(http, url, request, tx).await;
        });

        rx
    }
}

/// Producer loop: send the request, split the body into lines, parse each
/// line as a chunk, and relay typed events until the stream terminates.
async fn produce_events(
    http: Client,
    url: String,
    request: GenerateRequest,
    tx: mpsc::Sender<SummaryEvent>,
) {
    let resp = match http.post(&url).json(&request).send().await {
        Ok(r) => r,
        Err(e) => {
            let _ = tx
                .send(SummaryEvent::Error(format!("Ollama request failed: {e}")))
                .await;
            return;
        }
    };

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let _ = tx
            .send(SummaryEvent::Error(format!(
                "Ollama returned {status}: {body}"
            )))
            .await;
        return;
    }

    let mut stream = resp.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();

    while let Some(next) = stream.next().await {
        let bytes = match next {
            Ok(b) => b,
            Err(e) => {
                let _ = tx
                    .send(SummaryEvent::Error(format!("Ollama stream read failed: {e}")))
                    .await;
                return;
            }
        };

        buf.extend_from_slice(&bytes);

        // Drain every complete line from the buffer; a partial trailing
        // line stays buffered until the next network read.
        while let Some(pos) = buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<GenerateChunk>(line) {
                Ok(chunk) => {
                    if let Some(message) = chunk.error {
                        let _ = tx.send(SummaryEvent::Error(message)).await;
                        return;
                    }
                    if !chunk.response.is_empty()
                        && tx.send(SummaryEvent::Fragment(chunk.response)).await.is_err()
                    {
                        // Receiver dropped: the caller timed out or was
                        // cancelled. Stop reading.
                        return;
                    }
                    if chunk.done {
                        let _ = tx.send(SummaryEvent::Done).await;
                        return;
                    }
                }
                Err(e) => {
                    let _ = tx
                        .send(SummaryEvent::Error(format!(
                            "Ollama chunk parse failed: {e}"
                        )))
                        .await;
                    return;
                }
            }
        }
    }

    // Transport closed without a done chunk.
    let _ = tx
        .send(SummaryEvent::Error(
            "Ollama stream ended before signalling completion".to_string(),
        ))
        .await;
}
