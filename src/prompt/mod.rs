pub mod builder;

pub use builder::{build_repair_prompt, build_task_prompt, build_tools_prompt};
