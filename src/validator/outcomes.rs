use crate::{
    models::{ExecutionRecord, META_STEP_ID},
    validator::{ValidationError, ValidationErrorKind},
};

fn err(message: String) -> ValidationError {
    ValidationError::new(ValidationErrorKind::Outcome, message)
}

/// Post-condition check on the execution output: the terminal record appears
/// exactly once and last, and every outcome satisfies the skip/ok exclusion
/// and error-presence rules.
pub fn validate_outcomes(records: &[ExecutionRecord]) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if records.is_empty() {
        return vec![err("execution_results must not be empty".to_string())];
    }

    let meta_indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_meta() || r.step_id() == META_STEP_ID)
        .map(|(i, _)| i)
        .collect();

    if meta_indices.len() != 1 {
        errors.push(err(
            "__meta__ must appear exactly once in execution_results".to_string(),
        ));
    } else if meta_indices[0] != records.len() - 1 {
        errors.push(err(
            "__meta__ must be the last item in execution_results".to_string(),
        ));
    }

    for (i, record) in records.iter().enumerate() {
        match record {
            ExecutionRecord::Meta(meta) => {
                if !meta.ok || meta.skipped {
                    errors.push(err(format!(
                        "execution_results[{i}] invalid: __meta__ must have ok=true, skipped=false"
                    )));
                }
            }
            ExecutionRecord::Step(outcome) => {
                if outcome.step_id.trim().is_empty() {
                    errors.push(err(format!(
                        "execution_results[{i}].step_id must be a non-empty string"
                    )));
                }
                if outcome.skipped && outcome.ok {
                    errors.push(err(format!(
                        "execution_results[{i}] invalid: skipped=true requires ok=false"
                    )));
                }
                if outcome.ok && outcome.error.is_some() {
                    errors.push(err(format!(
                        "execution_results[{i}] invalid: ok=true must not include error"
                    )));
                }
                if !outcome.ok
                    && !outcome.skipped
                    && outcome.error.is_none()
                    && outcome.reason.is_none()
                {
                    errors.push(err(format!(
                        "execution_results[{i}] invalid: failed step should include error or reason"
                    )));
                }
            }
        }
    }

    errors
}
