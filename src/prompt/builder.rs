use crate::{input::UserTaskInput, tools::ToolInfo};

pub fn build_task_prompt(input: &UserTaskInput) -> String {
    let references = input
        .references
        .as_ref()
        .map(|refs| refs.join(", "))
        .unwrap_or_else(|| "None".to_string());

    let description = input.description.as_deref().unwrap_or("None");
    let constraints = input.constraints.as_deref().unwrap_or("None");

    format!(
        r#"
Please generate a task plan.

Task Goal: {}
Data Content: {}
Background Information: {}
Constraints: {}
References: {}
"#,
        input.goal, input.content, description, constraints, references
    )
}

pub fn build_tools_prompt(tools: &[ToolInfo]) -> String {
    let tools_text = tools
        .iter()
        .map(|tool| {
            format!(
                "\n - name: {}\n - description: {}\n - args_schema: {}",
                tool.name, tool.description, tool.args_schema
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Available tools:\n{}\n\nIMPORTANT: These are the ONLY tools available. Do not use or reference any other tools.",
        tools_text
    )
}

/// 修复指令：指出校验错误，并要求返回可再次解析的严格 JSON。
pub fn build_repair_prompt(error_summary: &str) -> String {
    format!(
        r#"你的上一轮输出未通过校验，需要修复。
校验错误：{error_summary}
修复要求：
- step_id 必须从 step_1 开始连续编号，dependencies 同步改为新编号
- 清除自由文本字段中破坏 JSON 的字符
- 只返回【严格合法 JSON】，不得添加解释文字。"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_prompt_substitutes_none_for_missing_fields() {
        let input = UserTaskInput::new("目标".to_string(), "数据".to_string(), None, None, None);
        let prompt = build_task_prompt(&input);

        assert!(prompt.contains("Task Goal: 目标"));
        assert!(prompt.contains("Background Information: None"));
        assert!(prompt.contains("References: None"));
    }

    #[test]
    fn tools_prompt_lists_every_tool_once() {
        let tools = vec![
            ToolInfo::new("echo_tool", "Echo back the input text.", serde_json::json!({})),
            ToolInfo::new("get_time", "Get current time in UTC (ISO8601).", serde_json::json!({})),
        ];
        let prompt = build_tools_prompt(&tools);

        assert!(prompt.contains(" - name: echo_tool"));
        assert!(prompt.contains(" - name: get_time"));
        assert!(prompt.contains("ONLY tools available"));
    }

    #[test]
    fn repair_prompt_embeds_error_summary() {
        let prompt = build_repair_prompt("step_id sequence must start from step_1");
        assert!(prompt.contains("step_id sequence must start from step_1"));
        assert!(prompt.contains("严格合法 JSON"));
    }
}
