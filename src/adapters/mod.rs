//! Wire adapters for the external collaborators: GitHub (source tracker),
//! Jira (target tracker), and Ollama (model endpoint).

pub mod github;
pub mod jira;
pub mod ollama;
