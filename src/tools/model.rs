use serde_json::Value;

/// Catalog entry shown to the planner, one per registered tool.
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub args_schema: Value,
}

impl ToolInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>, args_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            args_schema,
        }
    }
}
