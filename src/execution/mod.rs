pub mod degraded;
pub mod executor;
pub mod state;
pub mod status;

pub use executor::PlanExecutor;
pub use status::{classify, summarize};
