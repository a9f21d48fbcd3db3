pub mod llm;
pub mod planner;
pub mod repair;

pub use planner::generate_planner_messages;
pub use repair::generate_repair_messages;
