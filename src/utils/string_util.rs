pub trait StripCodeBlock {
    fn strip_code_block(&self) -> &str;
}

impl StripCodeBlock for str {
    fn strip_code_block(&self) -> &str {
        let trimmed = self.trim();
        if trimmed.starts_with("```")
            && let Some(pos) = trimmed.find('\n')
        {
            let inner = &trimmed[pos + 1..];
            if let Some(inner) = inner.strip_suffix("```") {
                return inner.trim();
            }
        }
        trimmed
    }
}

/// Best-effort slice of the outermost `{...}` span in free-form model text.
/// Returns the input unchanged when no such span exists.
pub fn extract_json_object(text: &str) -> &str {
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(s), Some(e)) if e > s => &text[s..=e],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_json_block() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(raw.strip_code_block(), "{\"a\": 1}");
    }

    #[test]
    fn strips_plain_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(raw.strip_code_block(), "{\"a\": 1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!("  {\"a\": 1} ".strip_code_block(), "{\"a\": 1}");
    }

    #[test]
    fn extracts_object_with_surrounding_prose() {
        let raw = "Here is the plan: {\"steps\": []} hope it helps";
        assert_eq!(extract_json_object(raw), "{\"steps\": []}");
    }

    #[test]
    fn extraction_falls_back_to_input() {
        assert_eq!(extract_json_object("no json here"), "no json here");
    }

    #[test]
    fn extraction_spans_nested_objects() {
        let raw = "x {\"a\": {\"b\": 2}} y";
        assert_eq!(extract_json_object(raw), "{\"a\": {\"b\": 2}}");
    }
}
