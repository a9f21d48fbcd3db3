use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub task_summary: String,

    #[serde(default)]
    pub assumptions: Vec<String>,

    #[serde(default)]
    pub risks: Vec<String>,

    pub steps: Vec<Step>,
}

impl Plan {
    /// 所有已声明的 step_id，按计划顺序
    pub fn declared_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub step_id: String,

    pub title: String,

    pub description: String,

    #[serde(default)]
    pub dependencies: Vec<String>,

    pub deliverable: String,

    pub acceptance: String,

    pub tool: ToolRef,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
}

/// 工具引用：裸名称，或携带参数的对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolRef {
    Named(String),
    WithArgs {
        name: String,
        #[serde(default)]
        args: Map<String, Value>,
    },
}

impl ToolRef {
    pub fn name(&self) -> &str {
        match self {
            ToolRef::Named(name) => name,
            ToolRef::WithArgs { name, .. } => name,
        }
    }

    /// Resolve to a canonical (name, args) pair. The bare form combines with
    /// step-level args; the object form carries its own and ignores them.
    pub fn resolve(&self, step_args: Option<&Map<String, Value>>) -> (String, Map<String, Value>) {
        match self {
            ToolRef::Named(name) => (name.clone(), step_args.cloned().unwrap_or_default()),
            ToolRef::WithArgs { name, args } => (name.clone(), args.clone()),
        }
    }
}
