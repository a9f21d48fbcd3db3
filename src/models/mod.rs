pub mod outcome;
pub mod plan;

pub use outcome::{
    ExecutionRecord, META_STEP_ID, ReasonCode, RunStats, RunSummary, StepOutcome, TaskStatus,
};
pub use plan::{Plan, Step, ToolRef};
