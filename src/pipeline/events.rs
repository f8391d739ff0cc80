use crate::domain::{ListingRecord, Source};
use std::fmt;

/// Lifecycle of one orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    /// The run finished; this includes runs that produced zero rows.
    Completed,
    /// The run could not be started or its worker died.
    Failed,
}

/// Everything a consumer hears about a run, in order. `Finished` is always last.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Progress { percent: u8, label: String },
    Error { source: Source, message: String },
    Finished { rows: Vec<ListingRecord> },
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::Progress { percent, label } => write!(f, "[{percent:>3}%] {label}"),
            PipelineEvent::Error { source, message } => write!(f, "{source} error: {message}"),
            PipelineEvent::Finished { rows } => write!(f, "Found {} properties", rows.len()),
        }
    }
}
