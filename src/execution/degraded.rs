use serde_json::Value;

/// Placeholder/fallback markers, English and Chinese. Matching is
/// case-insensitive over the tool name and the textual output content.
static DEGRADED_MARKERS: &[&str] = &[
    "unknown tool",
    "fallback",
    "not implemented",
    "未知工具",
    "回退",
    "降级",
    "未实现",
];

pub struct DegradedSignal {
    pub reason: String,
    pub degraded_from: Option<String>,
}

/// Inspect a successful invocation for known placeholder markers. Runs only
/// on successful outcomes; an errored invocation is already a failure.
pub fn detect_degraded(tool_name: &str, output: &Value) -> Option<DegradedSignal> {
    let mut haystack = tool_name.to_lowercase();
    haystack.push(' ');
    haystack.push_str(&collect_text(output).to_lowercase());

    let marker = DEGRADED_MARKERS
        .iter()
        .copied()
        .find(|m| haystack.contains(*m))?;

    Some(DegradedSignal {
        reason: format!("degraded marker detected: {marker}"),
        degraded_from: infer_degraded_from(&haystack),
    })
}

/// "unknown tool: <name>" in the output names the tool the fallback stood
/// in for.
fn infer_degraded_from(haystack: &str) -> Option<String> {
    for key in ["unknown tool:", "未知工具:"] {
        if let Some(rest) = haystack.split(key).nth(1) {
            let name: String = rest
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

fn collect_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(map) => map
            .values()
            .map(collect_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}
