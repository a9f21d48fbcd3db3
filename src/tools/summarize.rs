use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::tools::{Tool, ToolError};

fn coerce_int(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

pub struct SummarizeTool;

#[async_trait]
impl Tool for SummarizeTool {
    fn name(&self) -> &str {
        "summarize_tool"
    }

    fn description(&self) -> &str {
        "Summarize docs into concise key points (deterministic, no LLM)."
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "docs": {
                    "type": "array",
                    "description": "Docs to summarize; each item should include content",
                    "items": {"type": "object"},
                },
                "max_points": {
                    "type": "integer",
                    "description": "Max number of key points to output (1-5)",
                    "default": 2,
                },
            },
            "required": ["docs"],
            "additionalProperties": false,
        })
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let docs = args.get("docs").and_then(Value::as_array).ok_or_else(|| {
            ToolError::invalid_args(self.name(), "args.docs must be an array")
        })?;

        let mut max_points = coerce_int(args.get("max_points"), 2);
        if max_points <= 0 {
            max_points = 2;
        }
        if max_points > 5 {
            max_points = 5;
        }

        let mut points: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for doc in docs.iter().filter_map(Value::as_object) {
            let content = match doc.get("content") {
                Some(Value::String(s)) => s.trim().to_string(),
                Some(other) => other.to_string().trim().to_string(),
                None => String::new(),
            };
            if content.is_empty() {
                continue;
            }

            // collapse whitespace and bound length
            let mut point = content.split_whitespace().collect::<Vec<_>>().join(" ");
            if point.chars().count() > 120 {
                point = point.chars().take(117).collect::<String>() + "...";
            }

            if !seen.insert(point.clone()) {
                continue;
            }
            points.push(point);
            if points.len() >= max_points as usize {
                break;
            }
        }

        Ok(json!({"count": points.len(), "points": points}))
    }
}
