//! GitHub (source tracker) adapter.

pub mod client;
pub mod models;
pub mod source;

pub use client::GitHubClient;
pub use source::GitHubIssueSource;
