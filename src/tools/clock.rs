use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};

use crate::tools::{Tool, ToolError};

pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "Get current time in UTC (ISO8601)."
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        })
    }

    async fn call(&self, _args: &Map<String, Value>) -> Result<Value, ToolError> {
        Ok(json!({ "now_utc": Utc::now().to_rfc3339() }))
    }
}
