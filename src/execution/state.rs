use std::collections::HashMap;

/// Flags recorded for one visited step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepFlags {
    pub ok: bool,
    pub skipped: bool,
    pub degraded: bool,
}

/// Status bookkeeping for one execution pass, keyed by step_id.
/// Local to a single `execute` call; never shared across runs.
#[derive(Debug, Default, Clone)]
pub struct StatusTable {
    entries: HashMap<String, StepFlags>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step_id: &str, flags: StepFlags) {
        self.entries.insert(step_id.to_string(), flags);
    }

    pub fn get(&self, step_id: &str) -> Option<StepFlags> {
        self.entries.get(step_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_step_has_no_entry() {
        let table = StatusTable::new();
        assert!(table.get("step_1").is_none());
    }

    #[test]
    fn records_overwrite_by_id() {
        let mut table = StatusTable::new();
        table.record("step_1", StepFlags { ok: false, skipped: true, degraded: false });
        table.record("step_1", StepFlags { ok: true, skipped: false, degraded: false });

        let flags = table.get("step_1").unwrap();
        assert!(flags.ok);
        assert!(!flags.skipped);
    }
}
