use crate::{
    input::UserTaskInput,
    llm::ChatMessage,
    message::llm::{generate_assistant_tools, generate_user_message},
    tools::ToolInfo,
};

/// 规划消息：系统契约 + 工具清单 + 用户任务，顺序固定。
pub fn generate_planner_messages(input: &UserTaskInput, tools: &[ToolInfo]) -> Vec<ChatMessage> {
    let system_message: ChatMessage = generate_system_message();
    let tools_message: ChatMessage = generate_assistant_tools(tools);
    let user_message: ChatMessage = generate_user_message(input);
    vec![system_message, tools_message, user_message]
}

pub(crate) fn generate_system_message() -> ChatMessage {
    let content = r#"
You are a task planning assistant.
Your only output should be valid JSON matching this structure.

Rules:
- "step_id" values start from "step_1" and increase contiguously
- "dependencies" may only reference earlier step_id values
- "tool" is a tool name from the available tool list (see assistant message)
- Put tool parameters in "args" as a JSON object
- Steps with no dependencies use an empty array

Output JSON structure:
{
  "task_summary": "string",
  "assumptions": ["string"],
  "risks": ["string"],
  "steps": [
    {
      "step_id": "step_1",
      "title": "string",
      "description": "string",
      "dependencies": [],
      "deliverable": "string",
      "acceptance": "string",
      "tool": "tool_name",
      "args": {"param": "value"}
    }
  ]
}

Never include any notes, explanations, or natural language.
Only output the JSON in the exact structure above.
"#;
    ChatMessage::system(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::tools::default_registry;

    #[test]
    fn planner_messages_keep_contract_tools_task_order() {
        let registry = default_registry();
        let messages = generate_planner_messages(&UserTaskInput::default(), &registry.infos());

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[2].role, Role::User);

        assert!(messages[0].content.contains("\"task_summary\""));
        assert!(messages[1].content.contains("search_tool"));
        assert!(messages[2].content.contains("Task Goal"));
    }
}
