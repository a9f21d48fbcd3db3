//! 确定性计划执行内核：解析模型产出的 JSON 计划，校验契约，至多修复一次，
//! 然后按声明顺序执行并给出终态分类（COMPLETED / PARTIAL / FAILED / BLOCKED）。
//!
//! Entry points: [`runner::AgentRunner`] for the full planning round-trip,
//! [`execution::PlanExecutor`] for an already-accepted [`models::Plan`].

pub mod error;
pub mod execution;
pub mod input;
pub mod llm;
pub mod message;
pub mod models;
pub mod prompt;
pub mod runner;
pub mod tools;
pub mod utils;
pub mod validator;
