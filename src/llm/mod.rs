pub mod openai;

pub use openai::OpenAiChatService;

use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// 单条聊天消息，按 OpenAI 角色约定序列化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: Role::System,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("缺少环境变量: {0}")]
    MissingEnv(&'static str),

    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("上游返回 {status}: {body}")]
    Api { status: u16, body: String },

    #[error("响应没有任何 choices")]
    EmptyChoices,
}

/// 文本生成服务契约。实现方负责传输与重试策略，调用方只拿文本。
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI 兼容端点配置
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    /// 从环境变量读取；key 与 model 必填，base_url 缺省指向官方端点。
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = non_empty_var("OPENAI_API_KEY")
            .ok_or(CompletionError::MissingEnv("OPENAI_API_KEY"))?;
        let model =
            non_empty_var("OPENAI_MODEL").ok_or(CompletionError::MissingEnv("OPENAI_MODEL"))?;
        let base_url =
            non_empty_var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
