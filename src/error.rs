//! Error types for things
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown list, invalid config)
//! - 3: Not found (todo or project lookup failed in Things)
//! - 4: Operation failed (AppleScript error, osascript could not run)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for things CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for things operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown list: {0}")]
    UnknownList(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Lookups rejected by Things (exit code 3)
    #[error("Todo not found")]
    TodoNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    // Operation failures (exit code 4)
    #[error("AppleScript error: {0}")]
    AppleScript(String),

    #[error("Failed to run {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::UnknownList(_) | Error::InvalidConfig(_) => {
                exit_codes::USER_ERROR
            }

            Error::TodoNotFound | Error::ProjectNotFound => exit_codes::NOT_FOUND,

            Error::AppleScript(_)
            | Error::Launch { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Short machine-readable category for JSON output.
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            exit_codes::NOT_FOUND => "not_found",
            _ => "operation_failed",
        }
    }

    /// Structured context for JSON output, when the variant carries any.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::AppleScript(stderr) => Some(serde_json::json!({ "stderr": stderr })),
            Error::Launch { program, .. } => {
                Some(serde_json::json!({ "program": program.display().to_string() }))
            }
            Error::UnknownList(name) => Some(serde_json::json!({
                "list": name,
                "valid": crate::model::ListName::ALL
                    .iter()
                    .map(|list| list.as_str())
                    .collect::<Vec<_>>(),
            })),
            _ => None,
        }
    }
}

/// Result type alias for things operations
pub type Result<T> = std::result::Result<T, Error>;
