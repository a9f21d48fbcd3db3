use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTaskInput {
    /// 简短的任务目标，例如 "检索本地笔记并生成要点"
    pub goal: String,

    /// 任务数据，例如 "workflow skeleton 阶段的工程笔记"
    pub content: String,

    /// 任务背景说明，例如 "用于整理阶段性总结"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 特殊要求，例如 "要点不超过两条"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,

    /// 附加引用（预留字段）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
}

impl UserTaskInput {
    pub fn new(
        goal: String,
        content: String,
        description: Option<String>,
        constraints: Option<String>,
        references: Option<Vec<String>>,
    ) -> Self {
        Self {
            goal,
            content,
            description,
            constraints,
            references,
        }
    }
}

impl Default for UserTaskInput {
    fn default() -> Self {
        Self {
            goal: "检索本地笔记并生成要点".to_owned(),
            content: "workflow skeleton 阶段的工程笔记".to_owned(),
            description: Some("用于整理阶段性总结".to_owned()),
            constraints: Some("要点不超过两条，保持简洁".to_owned()),
            references: None,
        }
    }
}
