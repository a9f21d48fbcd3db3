use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::tools::ToolInfo;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),

    #[error("{tool}: {message}")]
    InvalidArgs { tool: String, message: String },

    #[error("{tool}: {message}")]
    Failed { tool: String, message: String },
}

impl ToolError {
    pub fn invalid_args(tool: &str, message: impl Into<String>) -> Self {
        ToolError::InvalidArgs {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

/// 计划步骤引用的工具契约
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn args_schema(&self) -> Value;

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError>;
}

/// Explicit registry value, constructed at startup and passed by reference.
/// Dispatch fails with `ToolError::Unknown` for unregistered names.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn known_names(&self) -> BTreeSet<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn infos(&self) -> Vec<ToolInfo> {
        self.tools
            .values()
            .map(|tool| {
                ToolInfo::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    tool.args_schema(),
                )
            })
            .collect()
    }

    pub async fn dispatch(&self, name: &str, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;
        tool.call(args).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn dispatch_unknown_name_fails() {
        let registry = ToolRegistry::new();
        let args = Map::new();

        let err = registry.dispatch("no_such_tool", &args).await.unwrap_err();
        assert!(matches!(err, ToolError::Unknown(_)));
        assert_eq!(err.to_string(), "Unknown tool: no_such_tool");
    }

    #[tokio::test]
    async fn dispatch_reaches_registered_tool() {
        let registry = crate::tools::default_registry();
        let args = serde_json::from_value::<Map<String, Value>>(json!({"text": "ping"})).unwrap();

        let out = registry.dispatch("echo_tool", &args).await.unwrap();
        assert_eq!(out, json!({"echo": "ping"}));
    }

    #[test]
    fn known_names_lists_builtins() {
        let registry = crate::tools::default_registry();
        let names = registry.known_names();

        assert!(names.contains("echo_tool"));
        assert!(names.contains("get_time"));
        assert!(names.contains("search_tool"));
        assert!(names.contains("summarize_tool"));
    }
}
