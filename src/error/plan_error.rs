use std::path::PathBuf;

use crate::validator::ValidationReport;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("模型输出为空")]
    EmptyOutput,

    #[error("解析计划失败: {message}; 片段: {preview}")]
    MalformedJson {
        message: String,
        preview: String,
        artifact: Option<PathBuf>,
    },

    #[error("计划校验失败: {0}")]
    ContractViolation(ValidationReport),

    #[error("修复后仍不合法: {0}")]
    RepairRejected(ValidationReport),
}

impl PlanError {
    /// 终止性错误附带的调试文件路径
    pub fn artifact(&self) -> Option<&PathBuf> {
        match self {
            PlanError::MalformedJson { artifact, .. } => artifact.as_ref(),
            _ => None,
        }
    }
}
