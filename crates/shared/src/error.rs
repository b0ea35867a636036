use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    MissingElement,
    Configuration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("command must have a non-empty name")]
    MissingName,
    #[error("command '{name}' must have an action")]
    MissingAction { name: String },
    #[error("commands must be an array, got {found}")]
    NotASequence { found: &'static str },
    #[error("malformed command spec: {0}")]
    MalformedSpec(String),
    #[error("required element '{0}' is missing from the document")]
    MissingElement(&'static str),
    #[error("invalid shortcut '{0}'")]
    InvalidShortcut(String),
    #[error("invalid page location '{0}'")]
    InvalidLocation(String),
}

impl PaletteError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingName
            | Self::MissingAction { .. }
            | Self::NotASequence { .. }
            | Self::MalformedSpec(_) => ErrorCode::Validation,
            Self::MissingElement(_) => ErrorCode::MissingElement,
            Self::InvalidShortcut(_) | Self::InvalidLocation(_) => ErrorCode::Configuration,
        }
    }
}

impl From<PaletteError> for ErrorReport {
    fn from(value: PaletteError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
