use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::tools::{Tool, ToolError};

pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo_tool"
    }

    fn description(&self) -> &str {
        "Echo back the input text."
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {"type": "string", "description": "Text to echo"},
            },
            "required": ["text"],
            "additionalProperties": false,
        })
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let text = args.get("text").cloned().unwrap_or(Value::String(String::new()));
        Ok(json!({ "echo": text }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_text() {
        let args = serde_json::from_value(json!({"text": "hello"})).unwrap();
        let out = EchoTool.call(&args).await.unwrap();
        assert_eq!(out, json!({"echo": "hello"}));
    }

    #[tokio::test]
    async fn missing_text_echoes_empty_string() {
        let out = EchoTool.call(&Map::new()).await.unwrap();
        assert_eq!(out, json!({"echo": ""}));
    }
}
