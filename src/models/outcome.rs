use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 终结记录的保留 step_id
pub const META_STEP_ID: &str = "__meta__";

/// Machine-readable cause attached to failed or skipped outcomes. The
/// classifier matches on this, never on the reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Dependency names an id no step declares.
    UnknownDependency,
    /// Dependency had no recorded outcome when the dependent was visited.
    DependencyUnexecuted,
    /// Dependency failed or was itself skipped.
    DependencyFailed,
    /// Dependency succeeded but degraded, under strict degraded mode.
    DependencyDegraded,
    /// The tool invocation returned an error.
    ToolError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    pub ok: bool,

    pub skipped: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<ReasonCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub degraded: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_from: Option<String>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl StepOutcome {
    fn base(step_id: &str) -> Self {
        Self {
            step_id: step_id.to_string(),
            tool: None,
            ok: false,
            skipped: false,
            reason_code: None,
            reason: None,
            error: None,
            output: None,
            degraded: false,
            degraded_reason: None,
            degraded_from: None,
        }
    }

    pub fn success(step_id: &str, tool: &str, output: Value) -> Self {
        Self {
            tool: Some(tool.to_string()),
            ok: true,
            output: Some(output),
            ..Self::base(step_id)
        }
    }

    /// 工具调用失败：ok=false, skipped=false
    pub fn tool_failure(step_id: &str, tool: Option<String>, error: String) -> Self {
        Self {
            tool,
            reason_code: Some(ReasonCode::ToolError),
            error: Some(error),
            ..Self::base(step_id)
        }
    }

    /// 硬性失败（未声明的依赖）：reason 与 error 同文
    pub fn hard_failure(step_id: &str, code: ReasonCode, message: String) -> Self {
        Self {
            reason_code: Some(code),
            reason: Some(message.clone()),
            error: Some(message),
            ..Self::base(step_id)
        }
    }

    /// 依赖未满足而跳过：工具不会被调用
    pub fn dependency_skip(step_id: &str, code: ReasonCode, reason: String) -> Self {
        Self {
            skipped: true,
            reason_code: Some(code),
            reason: Some(reason),
            ..Self::base(step_id)
        }
    }

    pub fn with_degraded(mut self, reason: String, from: Option<String>) -> Self {
        self.degraded = true;
        self.degraded_reason = Some(reason);
        self.degraded_from = from;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Completed,
    Partial,
    Failed,
    Blocked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_steps: usize,
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
    pub degraded: usize,
}

/// 终结记录，永远是结果序列的最后一个元素
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub step_id: String,

    pub ok: bool,

    pub skipped: bool,

    pub task_status: TaskStatus,

    pub stats: RunStats,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_steps: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_steps: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_steps: Vec<String>,
}

impl RunSummary {
    pub fn new(task_status: TaskStatus, stats: RunStats) -> Self {
        Self {
            step_id: META_STEP_ID.to_string(),
            ok: true,
            skipped: false,
            task_status,
            stats,
            blocked_steps: Vec::new(),
            failed_steps: Vec::new(),
            degraded_steps: Vec::new(),
        }
    }
}

/// One element of the execution output: a per-step outcome, or the single
/// terminal summary. Untagged, so the wire shape stays flat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionRecord {
    Meta(RunSummary),
    Step(StepOutcome),
}

impl ExecutionRecord {
    pub fn step_id(&self) -> &str {
        match self {
            ExecutionRecord::Meta(meta) => &meta.step_id,
            ExecutionRecord::Step(step) => &step.step_id,
        }
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, ExecutionRecord::Meta(_))
    }

    pub fn as_step(&self) -> Option<&StepOutcome> {
        match self {
            ExecutionRecord::Step(step) => Some(step),
            ExecutionRecord::Meta(_) => None,
        }
    }

    pub fn as_meta(&self) -> Option<&RunSummary> {
        match self {
            ExecutionRecord::Meta(meta) => Some(meta),
            ExecutionRecord::Step(_) => None,
        }
    }
}
