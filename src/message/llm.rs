use crate::{
    llm::ChatMessage,
    prompt::builder::{build_task_prompt, build_tools_prompt},
    tools::ToolInfo,
};

use crate::input::UserTaskInput;

pub fn generate_assistant_tools(tools: &[ToolInfo]) -> ChatMessage {
    let content = build_tools_prompt(tools);
    ChatMessage::assistant(content.as_str())
}

pub fn generate_user_message(input: &UserTaskInput) -> ChatMessage {
    let content = build_task_prompt(input);
    ChatMessage::user(content.as_str())
}
