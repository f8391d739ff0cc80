mod events;
mod orchestrator;

pub use events::{PipelineEvent, PipelineState};
pub use orchestrator::{merge_results, Orchestrator, PipelineRun};

#[cfg(test)]
pub(crate) use orchestrator::percent_complete;
