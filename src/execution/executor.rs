use std::{collections::HashSet, sync::Arc};

use tracing::{debug, info, warn};

use super::{
    degraded::detect_degraded,
    state::{StatusTable, StepFlags},
    status::summarize,
};
use crate::{
    models::{ExecutionRecord, Plan, ReasonCode, Step, StepOutcome},
    tools::ToolRegistry,
};

/// 顺序执行引擎：按声明顺序逐步执行，不重排、不重试。
///
/// Every step yields exactly one outcome, and the terminal `__meta__` record
/// is always appended last, even when every step failed.
pub struct PlanExecutor {
    registry: Arc<ToolRegistry>,
    strict_degraded: bool,
}

impl PlanExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            strict_degraded: false,
        }
    }

    /// 严格模式：降级成功的依赖视为未满足。
    pub fn with_strict_degraded(mut self, strict: bool) -> Self {
        self.strict_degraded = strict;
        self
    }

    /// Run the whole plan. Tool errors become failed outcomes rather than
    /// aborting the pass, so this call itself cannot fail.
    pub async fn execute(&self, plan: &Plan) -> Vec<ExecutionRecord> {
        let declared: HashSet<&str> = plan.declared_ids().into_iter().collect();
        let mut table = StatusTable::new();
        let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(plan.steps.len());

        debug!("Executing plan with {} steps", plan.steps.len());

        for step in &plan.steps {
            let outcome = self.run_step(step, &declared, &table).await;
            table.record(
                &outcome.step_id,
                StepFlags {
                    ok: outcome.ok,
                    skipped: outcome.skipped,
                    degraded: outcome.degraded,
                },
            );

            if outcome.ok {
                info!(
                    "Step {} completed with tool {}",
                    outcome.step_id,
                    outcome.tool.as_deref().unwrap_or("?")
                );
            } else if outcome.skipped {
                info!(
                    "Step {} skipped: {}",
                    outcome.step_id,
                    outcome.reason.as_deref().unwrap_or("")
                );
            } else {
                warn!(
                    "Step {} failed: {}",
                    outcome.step_id,
                    outcome.error.as_deref().unwrap_or("")
                );
            }

            outcomes.push(outcome);
        }

        let summary = summarize(&outcomes);
        info!(
            "Plan finished: {:?} ({} ok, {} skipped, {} failed)",
            summary.task_status, summary.stats.ok, summary.stats.skipped, summary.stats.failed
        );

        let mut records: Vec<ExecutionRecord> =
            outcomes.into_iter().map(ExecutionRecord::Step).collect();
        records.push(ExecutionRecord::Meta(summary));
        records
    }

    /// One step, four phases: declaration check, satisfaction check,
    /// invocation, degraded detection. The first failing phase decides
    /// the outcome; later phases never run.
    async fn run_step(
        &self,
        step: &Step,
        declared: &HashSet<&str>,
        table: &StatusTable,
    ) -> StepOutcome {
        let unknown: Vec<&str> = step
            .dependencies
            .iter()
            .map(String::as_str)
            .filter(|dep| !declared.contains(dep))
            .collect();
        if !unknown.is_empty() {
            return StepOutcome::hard_failure(
                &step.step_id,
                ReasonCode::UnknownDependency,
                format!("unknown dependency: {unknown:?}"),
            );
        }

        let mut unexecuted: Vec<&str> = Vec::new();
        let mut failed: Vec<&str> = Vec::new();
        let mut degraded: Vec<&str> = Vec::new();
        for dep in &step.dependencies {
            match table.get(dep) {
                None => unexecuted.push(dep),
                Some(flags) if !flags.ok || flags.skipped => failed.push(dep),
                Some(flags) if flags.degraded && self.strict_degraded => degraded.push(dep),
                Some(_) => {}
            }
        }
        if !unexecuted.is_empty() || !failed.is_empty() || !degraded.is_empty() {
            // 最强原因优先：未执行 > 失败 > 降级
            let code = if !unexecuted.is_empty() {
                ReasonCode::DependencyUnexecuted
            } else if !failed.is_empty() {
                ReasonCode::DependencyFailed
            } else {
                ReasonCode::DependencyDegraded
            };
            let reason = skip_reason(&unexecuted, &failed, &degraded);
            return StepOutcome::dependency_skip(&step.step_id, code, reason);
        }

        let (name, args) = step.tool.resolve(step.args.as_ref());
        match self.registry.dispatch(&name, &args).await {
            Ok(output) => {
                let signal = detect_degraded(&name, &output);
                let outcome = StepOutcome::success(&step.step_id, &name, output);
                match signal {
                    Some(signal) => outcome.with_degraded(signal.reason, signal.degraded_from),
                    None => outcome,
                }
            }
            Err(err) => StepOutcome::tool_failure(&step.step_id, Some(name), err.to_string()),
        }
    }
}

fn skip_reason(unexecuted: &[&str], failed: &[&str], degraded: &[&str]) -> String {
    let mut parts = Vec::new();

    let mut unsatisfied: Vec<&str> = Vec::with_capacity(unexecuted.len() + failed.len());
    unsatisfied.extend_from_slice(unexecuted);
    unsatisfied.extend_from_slice(failed);
    if !unsatisfied.is_empty() {
        parts.push(format!("dependency not satisfied: {unsatisfied:?}"));
    }
    if !degraded.is_empty() {
        parts.push(format!("dependency degraded: {degraded:?}"));
    }

    parts.join("; ")
}
