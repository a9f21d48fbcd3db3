use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::validator::{ValidateOptions, ValidationError, ValidationErrorKind};

fn err(kind: ValidationErrorKind, message: String) -> ValidationError {
    ValidationError::new(kind, message)
}

/// Structural and semantic contract check over a raw plan document.
///
/// Pure; returns an empty list iff the document satisfies every rule.
/// Short-circuits on fatal structural failure: a non-object document,
/// missing top-level fields, or a missing/empty `steps` array end the
/// check with the errors collected so far.
pub fn validate_plan(doc: &Value, opts: &ValidateOptions) -> Vec<ValidationError> {
    use ValidationErrorKind::*;

    let mut errors: Vec<ValidationError> = Vec::new();

    let Some(payload) = doc.as_object() else {
        return vec![err(TopLevel, "payload must be an object".to_string())];
    };

    for key in ["task_summary", "steps", "assumptions", "risks"] {
        if !payload.contains_key(key) {
            errors.push(err(TopLevel, format!("missing top-level field: {key}")));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    if payload["task_summary"]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .is_none()
    {
        errors.push(err(
            TopLevel,
            "task_summary must be a non-empty string".to_string(),
        ));
    }

    let steps = match payload["steps"].as_array() {
        Some(steps) if !steps.is_empty() => steps,
        _ => {
            errors.push(err(TopLevel, "steps must be a non-empty array".to_string()));
            return errors;
        }
    };

    for key in ["assumptions", "risks"] {
        let well_typed = payload[key]
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !well_typed {
            errors.push(err(TopLevel, format!("{key} must be an array of strings")));
        }
    }

    // collect declared ids first so dependency checks see later steps too
    let mut step_ids: Vec<String> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    for (i, step) in steps.iter().enumerate() {
        let Some(obj) = step.as_object() else {
            errors.push(err(StepShape, format!("steps[{i}] must be an object")));
            continue;
        };
        match obj.get("step_id").and_then(Value::as_str) {
            Some(sid) if !sid.trim().is_empty() => {
                step_ids.push(sid.to_string());
                index_by_id.entry(sid.to_string()).or_insert(i);
            }
            _ => errors.push(err(
                StepShape,
                format!("steps[{i}].step_id must be a non-empty string"),
            )),
        }
    }

    let declared: HashSet<&str> = step_ids.iter().map(String::as_str).collect();
    if declared.len() != step_ids.len() {
        errors.push(err(
            StepShape,
            "step_id must be unique across steps".to_string(),
        ));
    }

    let required_step_fields = [
        "step_id",
        "title",
        "description",
        "dependencies",
        "deliverable",
        "acceptance",
        "tool",
    ];

    for (i, step) in steps.iter().enumerate() {
        let Some(obj) = step.as_object() else {
            continue;
        };

        for key in required_step_fields {
            if !obj.contains_key(key) {
                errors.push(err(StepShape, format!("steps[{i}] missing field: {key}")));
            }
        }

        for key in ["title", "description", "deliverable", "acceptance"] {
            if let Some(value) = obj.get(key)
                && value.as_str().filter(|s| !s.trim().is_empty()).is_none()
            {
                errors.push(err(
                    StepShape,
                    format!("steps[{i}].{key} must be a non-empty string"),
                ));
            }
        }

        match obj.get("dependencies") {
            None | Some(Value::Null) => {}
            Some(Value::Array(deps)) => {
                for (j, dep) in deps.iter().enumerate() {
                    let Some(d) = dep.as_str().filter(|d| !d.trim().is_empty()) else {
                        errors.push(err(
                            Dependency,
                            format!("steps[{i}].dependencies[{j}] must be a non-empty string"),
                        ));
                        continue;
                    };
                    if !declared.contains(d) {
                        errors.push(err(
                            Dependency,
                            format!("steps[{i}] has unknown dependency: {d}"),
                        ));
                        continue;
                    }
                    if opts.strict_dep_order
                        && let Some(&idx) = index_by_id.get(d)
                        && idx >= i
                    {
                        errors.push(err(
                            Dependency,
                            format!("steps[{i}] has forward dependency: {d}"),
                        ));
                    }
                }
            }
            Some(_) => errors.push(err(
                Dependency,
                format!("steps[{i}].dependencies must be an array"),
            )),
        }

        match obj.get("tool") {
            None => {}
            Some(Value::Null) => errors.push(err(
                ToolShape,
                format!("steps[{i}] missing required field: tool"),
            )),
            Some(Value::String(tool)) => {
                if opts.require_tool_object {
                    errors.push(err(
                        ToolShape,
                        format!("steps[{i}].tool must be an object (string form is not allowed)"),
                    ));
                } else if tool.trim().is_empty() {
                    errors.push(err(
                        ToolShape,
                        format!("steps[{i}].tool must be a non-empty string"),
                    ));
                } else if let Some(known) = &opts.known_tools
                    && !known.contains(tool.trim())
                {
                    errors.push(err(
                        ToolShape,
                        format!("steps[{i}] has unknown tool: {}", tool.trim()),
                    ));
                }
                if let Some(args) = obj.get("args")
                    && !args.is_null()
                    && !args.is_object()
                {
                    errors.push(err(
                        ToolShape,
                        format!("steps[{i}].args must be an object when provided"),
                    ));
                }
            }
            Some(Value::Object(tool)) => {
                match tool.get("name").and_then(Value::as_str).map(str::trim) {
                    Some(name) if !name.is_empty() => {
                        if let Some(known) = &opts.known_tools
                            && !known.contains(name)
                        {
                            errors.push(err(
                                ToolShape,
                                format!("steps[{i}] has unknown tool: {name}"),
                            ));
                        }
                    }
                    _ => errors.push(err(
                        ToolShape,
                        format!("steps[{i}].tool.name must be a non-empty string"),
                    )),
                }
                if let Some(args) = tool.get("args")
                    && !args.is_null()
                    && !args.is_object()
                {
                    errors.push(err(
                        ToolShape,
                        format!("steps[{i}].tool.args must be an object"),
                    ));
                }
                if obj.contains_key("args") {
                    errors.push(err(
                        ToolShape,
                        format!("steps[{i}] must not provide both step.args and tool.args"),
                    ));
                }
            }
            Some(_) => errors.push(err(
                ToolShape,
                format!("steps[{i}].tool must be a string or an object"),
            )),
        }
    }

    // step_<k> sequencing: reject plans like step_2/step_3 without step_1,
    // or step_1/step_3 (gap)
    let mut nums: Vec<u64> = Vec::new();
    for sid in &step_ids {
        if let Some(tail) = sid.strip_prefix("step_")
            && !tail.is_empty()
            && tail.chars().all(|c| c.is_ascii_digit())
            && let Ok(n) = tail.parse::<u64>()
        {
            nums.push(n);
        }
    }
    if !nums.is_empty() {
        nums.sort_unstable();
        if nums[0] != 1 {
            errors.push(err(
                Sequence,
                "step_id sequence must start from step_1".to_string(),
            ));
        } else if nums.windows(2).any(|w| w[1] != w[0] + 1) {
            errors.push(err(
                Sequence,
                "step_id sequence must be contiguous: step_1..step_N".to_string(),
            ));
        }
    }

    if let Some(expected) = opts.expected_steps
        && steps.len() != expected
    {
        errors.push(err(
            StepCount,
            format!("plan must contain exactly {expected} steps (got {})", steps.len()),
        ));
    }

    errors
}
