//! Ollama (model endpoint) adapter.

pub mod client;
pub mod models;

pub use client::OllamaClient;
