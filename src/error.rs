//! Errors raised while building an engine
//!
//! Classification itself never fails; everything here is a problem with
//! static configuration discovered at load time.

use thiserror::Error;

use crate::types::ComponentType;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid slot schema `{schema}`: {reason}")]
    InvalidSchema { schema: String, reason: String },

    #[error("more than one slot schema registered for {0}")]
    DuplicateSchema(ComponentType),

    #[error("pipeline already contains a scorer for {0}")]
    DuplicateScorer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn schema(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            schema: schema.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
