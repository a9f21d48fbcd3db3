pub mod clock;
pub mod echo;
pub mod instantiate;
pub mod model;
pub mod registry;
pub mod search;
pub mod summarize;

pub use clock::ClockTool;
pub use echo::EchoTool;
pub use instantiate::default_registry;
pub use model::ToolInfo;
pub use registry::{Tool, ToolError, ToolRegistry};
pub use search::SearchTool;
pub use summarize::SummarizeTool;
