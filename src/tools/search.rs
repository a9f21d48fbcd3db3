use std::cmp::Ordering;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{Map, Value, json};

use crate::tools::{Tool, ToolError};

struct CorpusDoc {
    doc_id: String,
    content: String,
}

/// 本地小语料，零网络依赖
static MINI_CORPUS: Lazy<Vec<CorpusDoc>> = Lazy::new(|| {
    vec![
        CorpusDoc {
            doc_id: "note_1".to_string(),
            content: "今天完成了 workflow skeleton：Input -> Retrieval -> Reasoning -> Output，且每个节点可插拔。"
                .to_string(),
        },
        CorpusDoc {
            doc_id: "note_2".to_string(),
            content: "retriever/reasoner/renderer 都通过注入策略实现解耦，run 保持稳定，变化集中在策略函数。"
                .to_string(),
        },
        CorpusDoc {
            doc_id: "note_3".to_string(),
            content: "当前阶段不接 LLM、不接向量库，先保证数据协议、可追踪、可回滚、可调试。".to_string(),
        },
    ]
});

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

/// Character-hit ratio of the query against one document.
fn score_content(query: &str, content: &str) -> f64 {
    let chars: Vec<char> = query.chars().filter(|c| !c.is_whitespace()).collect();
    let denom = chars.len().max(1) as f64;
    let hits = chars.iter().filter(|c| content.contains(**c)).count() as f64;
    hits / denom
}

pub struct SearchTool;

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search_tool"
    }

    fn description(&self) -> &str {
        "Local keyword search over a small built-in corpus (no network)."
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query string"},
                "top_k": {"type": "integer", "description": "Number of docs to return (1-10)", "default": 3},
            },
            "required": ["query"],
            "additionalProperties": false,
        })
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| {
                ToolError::invalid_args(self.name(), "args.query must be a non-empty string")
            })?;

        let mut top_k = coerce_int(args.get("top_k"), 3);
        if top_k <= 0 {
            top_k = 3;
        }
        if top_k > 10 {
            top_k = 10;
        }

        let mut ranked: Vec<(&CorpusDoc, f64)> = MINI_CORPUS
            .iter()
            .map(|doc| (doc, score_content(query, &doc.content)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let docs: Vec<Value> = ranked
            .into_iter()
            .take(top_k as usize)
            .map(|(doc, _)| json!({"doc_id": doc.doc_id, "content": doc.content}))
            .collect();

        Ok(json!({"query": query, "top_k": top_k, "docs": docs}))
    }
}
