use crate::{
    llm::ChatMessage, message::planner::generate_system_message, prompt::build_repair_prompt,
};

/// 修复消息：原系统契约 + 模型上一轮原文 + 修复指令。
/// 只用于单次修复回合，不会嵌套。
pub fn generate_repair_messages(raw_output: &str, error_summary: &str) -> Vec<ChatMessage> {
    vec![
        generate_system_message(),
        ChatMessage::assistant(raw_output),
        ChatMessage::user(build_repair_prompt(error_summary).as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn repair_messages_replay_raw_output_before_the_instruction() {
        let messages = generate_repair_messages(
            "{\"steps\": []}",
            "steps must be a non-empty array",
        );

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "{\"steps\": []}");
        assert_eq!(messages[2].role, Role::User);
        assert!(messages[2].content.contains("steps must be a non-empty array"));
    }
}
