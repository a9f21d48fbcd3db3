use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{ExecutionRecord, Plan, RunStats, RunSummary, StepOutcome, TaskStatus};

/// 完整运行报告：被接受的计划加上全部执行记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub plan: Plan,
    pub execution_results: Vec<ExecutionRecord>,
}

impl RunReport {
    pub fn new(plan: Plan, execution_results: Vec<ExecutionRecord>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            plan,
            execution_results,
        }
    }

    pub fn meta(&self) -> Option<&RunSummary> {
        self.execution_results
            .iter()
            .find_map(ExecutionRecord::as_meta)
    }

    /// 最后一个非终结步骤
    pub fn last_step(&self) -> Option<&StepOutcome> {
        self.execution_results
            .iter()
            .rev()
            .find_map(ExecutionRecord::as_step)
    }

    fn digest(&self) -> Option<RunDigest> {
        let meta = self.meta()?;
        let mut digest = RunDigest {
            task_status: meta.task_status,
            stats: meta.stats.clone(),
            last_step_id: None,
            tool: None,
            output: None,
        };

        if let Some(step) = self.last_step() {
            digest.last_step_id = Some(step.step_id.clone());
            digest.tool = step.tool.clone();
            digest.output = step.output.clone();
        }

        Some(digest)
    }
}

/// 摘要输出：状态、统计与最后一步的产出。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDigest {
    pub task_status: TaskStatus,

    pub stats: RunStats,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_step_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunOutput {
    Full(RunReport),
    Digest(RunDigest),
}

impl RunOutput {
    /// debug 模式、缺失终结记录或 FAILED/BLOCKED 状态返回完整报告，
    /// 其余返回摘要。错误细节永远不会被摘要吞掉。
    pub fn finalize(report: RunReport, debug: bool) -> RunOutput {
        if debug {
            return RunOutput::Full(report);
        }

        match report.digest() {
            Some(digest)
                if !matches!(digest.task_status, TaskStatus::Failed | TaskStatus::Blocked) =>
            {
                RunOutput::Digest(digest)
            }
            _ => RunOutput::Full(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn report(task_status: TaskStatus) -> RunReport {
        let plan: Plan = serde_json::from_value(json!({
            "task_summary": "echo once",
            "steps": [{
                "step_id": "step_1",
                "title": "echo",
                "description": "echo hello",
                "dependencies": [],
                "deliverable": "echoed text",
                "acceptance": "echo field present",
                "tool": "echo_tool",
                "args": {"text": "hello"}
            }]
        }))
        .unwrap();

        let outcome = match task_status {
            TaskStatus::Completed => {
                StepOutcome::success("step_1", "echo_tool", json!({"echo": "hello"}))
            }
            _ => StepOutcome::tool_failure(
                "step_1",
                Some("echo_tool".to_string()),
                "boom".to_string(),
            ),
        };
        let stats = RunStats {
            total_steps: 1,
            ..RunStats::default()
        };

        RunReport::new(
            plan,
            vec![
                ExecutionRecord::Step(outcome),
                ExecutionRecord::Meta(RunSummary::new(task_status, stats)),
            ],
        )
    }

    #[test]
    fn debug_always_returns_full_report() {
        let output = RunOutput::finalize(report(TaskStatus::Completed), true);
        assert!(matches!(output, RunOutput::Full(_)));
    }

    #[test]
    fn completed_run_digests_to_last_step_output() {
        let output = RunOutput::finalize(report(TaskStatus::Completed), false);

        let RunOutput::Digest(digest) = output else {
            panic!("expected digest");
        };
        assert_eq!(digest.task_status, TaskStatus::Completed);
        assert_eq!(digest.last_step_id.as_deref(), Some("step_1"));
        assert_eq!(digest.tool.as_deref(), Some("echo_tool"));
        assert_eq!(digest.output, Some(json!({"echo": "hello"})));
    }

    #[test]
    fn failed_run_keeps_the_full_report() {
        let output = RunOutput::finalize(report(TaskStatus::Failed), false);
        assert!(matches!(output, RunOutput::Full(_)));
    }

    #[test]
    fn digest_serializes_without_absent_output() {
        let digest = RunDigest {
            task_status: TaskStatus::Partial,
            stats: RunStats::default(),
            last_step_id: None,
            tool: None,
            output: None,
        };
        let value = serde_json::to_value(&digest).unwrap();

        assert_eq!(value["task_status"], json!("PARTIAL"));
        assert!(value.get("output").is_none());
        assert!(value.get("tool").is_none());
    }
}
