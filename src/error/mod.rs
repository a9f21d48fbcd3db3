pub mod plan_error;

use std::io;

use thiserror::Error as ThisError;

use crate::{error::plan_error::PlanError, llm::CompletionError, tools::ToolError};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("completion error: {0}")]
    CompletionError(#[from] CompletionError),

    #[error("tool error: {0}")]
    ToolError(#[from] ToolError),

    #[error("plan error: {0}")]
    PlanError(#[from] PlanError),
}

pub type Result<T> = core::result::Result<T, Error>;
