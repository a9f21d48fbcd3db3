use crate::models::{ReasonCode, RunStats, RunSummary, StepOutcome, TaskStatus};

/// Derive the aggregate run status from per-step outcomes (terminal record
/// excluded). Deterministic, pure, total.
///
/// Priority is global, not scan-order: a blocking signal anywhere outranks
/// failures anywhere, which outrank soft skips.
pub fn classify(outcomes: &[StepOutcome]) -> TaskStatus {
    if outcomes.is_empty() {
        return TaskStatus::Blocked;
    }

    let mut any_failed = false;
    let mut any_skipped = false;

    for outcome in outcomes {
        if is_blocking(outcome) {
            return TaskStatus::Blocked;
        }
        if !outcome.ok && !outcome.skipped {
            any_failed = true;
        }
        if outcome.skipped {
            any_skipped = true;
        }
    }

    if any_failed {
        TaskStatus::Failed
    } else if any_skipped {
        TaskStatus::Partial
    } else {
        TaskStatus::Completed
    }
}

/// Blocking causes: an undeclared dependency, or a dependency that had no
/// recorded outcome when its dependent was visited. Ordinary cascades
/// (`dependency_failed`) and the strict-degraded skip are soft.
fn is_blocking(outcome: &StepOutcome) -> bool {
    matches!(
        outcome.reason_code,
        Some(ReasonCode::UnknownDependency | ReasonCode::DependencyUnexecuted)
    )
}

/// Build the terminal record: aggregate status, denormalized counts, and the
/// blocked/failed/degraded id lists, in one extra pass.
pub fn summarize(outcomes: &[StepOutcome]) -> RunSummary {
    let mut summary = RunSummary::new(
        classify(outcomes),
        RunStats {
            total_steps: outcomes.len(),
            ..RunStats::default()
        },
    );

    for outcome in outcomes {
        if outcome.ok {
            summary.stats.ok += 1;
        } else if outcome.skipped {
            summary.stats.skipped += 1;
        } else {
            summary.stats.failed += 1;
        }

        if outcome.degraded {
            summary.stats.degraded += 1;
            summary.degraded_steps.push(outcome.step_id.clone());
        }

        if is_blocking(outcome) {
            summary.blocked_steps.push(outcome.step_id.clone());
        } else if !outcome.ok && !outcome.skipped {
            summary.failed_steps.push(outcome.step_id.clone());
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::META_STEP_ID;

    fn ok(step_id: &str) -> StepOutcome {
        StepOutcome::success(step_id, "get_time", json!({}))
    }

    fn failed(step_id: &str) -> StepOutcome {
        StepOutcome::tool_failure(step_id, Some("get_time".to_string()), "boom".to_string())
    }

    fn skipped(step_id: &str, code: ReasonCode) -> StepOutcome {
        StepOutcome::dependency_skip(step_id, code, "dependency not satisfied".to_string())
    }

    #[test]
    fn empty_is_blocked() {
        assert_eq!(classify(&[]), TaskStatus::Blocked);
    }

    #[test]
    fn all_ok_is_completed() {
        assert_eq!(classify(&[ok("step_1"), ok("step_2")]), TaskStatus::Completed);
    }

    #[test]
    fn tool_failure_with_cascade_skip_is_failed() {
        let outcomes = [failed("step_1"), skipped("step_2", ReasonCode::DependencyFailed)];
        assert_eq!(classify(&outcomes), TaskStatus::Failed);
    }

    #[test]
    fn unknown_dependency_blocks_regardless_of_other_outcomes() {
        let unknown = StepOutcome::hard_failure(
            "step_2",
            ReasonCode::UnknownDependency,
            "unknown dependency: [\"step_9\"]".to_string(),
        );
        let outcomes = [ok("step_1"), unknown, failed("step_3")];
        assert_eq!(classify(&outcomes), TaskStatus::Blocked);
    }

    #[test]
    fn unexecuted_dependency_skip_blocks() {
        let outcomes = [skipped("step_1", ReasonCode::DependencyUnexecuted), ok("step_2")];
        assert_eq!(classify(&outcomes), TaskStatus::Blocked);
    }

    #[test]
    fn soft_skip_alone_is_partial() {
        let outcomes = [ok("step_1"), skipped("step_2", ReasonCode::DependencyDegraded)];
        assert_eq!(classify(&outcomes), TaskStatus::Partial);
    }

    #[test]
    fn summary_partitions_counts() {
        let degraded_ok = ok("step_3").with_degraded("degraded marker detected: fallback".to_string(), None);
        let outcomes = [
            ok("step_1"),
            failed("step_2"),
            degraded_ok,
            skipped("step_4", ReasonCode::DependencyFailed),
        ];

        let summary = summarize(&outcomes);
        assert_eq!(summary.step_id, META_STEP_ID);
        assert!(summary.ok);
        assert!(!summary.skipped);
        assert_eq!(summary.task_status, TaskStatus::Failed);
        assert_eq!(summary.stats.total_steps, 4);
        assert_eq!(summary.stats.ok, 2);
        assert_eq!(summary.stats.failed, 1);
        assert_eq!(summary.stats.skipped, 1);
        assert_eq!(summary.stats.degraded, 1);
        assert_eq!(summary.failed_steps, vec!["step_2".to_string()]);
        assert_eq!(summary.degraded_steps, vec!["step_3".to_string()]);
        assert!(summary.blocked_steps.is_empty());
    }

    #[test]
    fn summary_lists_blocked_ids() {
        let unknown = StepOutcome::hard_failure(
            "step_1",
            ReasonCode::UnknownDependency,
            "unknown dependency: [\"step_9\"]".to_string(),
        );
        let summary = summarize(&[unknown]);

        assert_eq!(summary.task_status, TaskStatus::Blocked);
        assert_eq!(summary.blocked_steps, vec!["step_1".to_string()]);
        assert!(summary.failed_steps.is_empty());
    }
}
