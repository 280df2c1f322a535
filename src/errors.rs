//! Unified application error type.
//! All modules (store, session, timer, export, cli) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage / serialization
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown field '{field}' for form '{form}'")]
    UnknownField { form: String, field: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid record kind: {0}")]
    InvalidKind(String),

    // ---------------------------
    // Breathing timer
    // ---------------------------
    #[error("Invalid breathing pattern: {0}")]
    InvalidPattern(String),

    #[error("Breathing timer is not running")]
    TimerNotRunning,

    #[error("Breathing timer is already running")]
    TimerAlreadyRunning,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        AppError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
