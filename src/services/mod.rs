//! Pipeline services: summary generation, deduplication, mirroring, and
//! scheduling.

pub mod ledger;
pub mod mirror;
pub mod poll_cycle;
pub mod scheduler;
pub mod summarizer;

pub use ledger::InMemoryLedger;
pub use mirror::MirrorService;
pub use poll_cycle::{CycleStats, PollCycle};
pub use scheduler::{DaemonHandle, PollDaemon};
pub use summarizer::SummaryGenerator;
