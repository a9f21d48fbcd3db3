pub mod outcomes;
pub mod plan;

use std::{collections::BTreeSet, fmt};

pub use outcomes::validate_outcomes;
pub use plan::validate_plan;

/// Coarse category of a validation failure. `Sequence` and `StepCount` are
/// the repairable ones: a corrective round-trip can renumber steps, nothing
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    TopLevel,
    StepShape,
    Dependency,
    ToolShape,
    Sequence,
    StepCount,
    Outcome,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_repairable(&self) -> bool {
        matches!(
            self.kind,
            ValidationErrorKind::Sequence | ValidationErrorKind::StepCount
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport(pub Vec<ValidationError>);

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 仅当全部错误均可修复时才触发修复回合
    pub fn is_repairable(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(ValidationError::is_repairable)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl From<Vec<ValidationError>> for ValidationReport {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Dependencies must reference strictly earlier steps.
    pub strict_dep_order: bool,

    /// Reject the bare-string tool form.
    pub require_tool_object: bool,

    /// When set, every referenced tool name must be a member.
    pub known_tools: Option<BTreeSet<String>>,

    /// When set, the plan must contain exactly this many steps.
    pub expected_steps: Option<usize>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict_dep_order: true,
            require_tool_object: false,
            known_tools: None,
            expected_steps: None,
        }
    }
}

impl ValidateOptions {
    pub fn with_known_tools(mut self, known_tools: BTreeSet<String>) -> Self {
        self.known_tools = Some(known_tools);
        self
    }

    pub fn with_expected_steps(mut self, expected_steps: usize) -> Self {
        self.expected_steps = Some(expected_steps);
        self
    }
}
