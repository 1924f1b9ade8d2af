/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise Syn-Seek error types to provide consistent
    diagnostics and exit semantics.

  Security / Safety Notes:
    Error messages only echo operator input (selection tokens,
    paths) and external command names.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to propagate failures and consolidate
    exit codes for the binary entry point.

  Revision History:
    2025-11-12 COD  Established shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths
    - Stable exit codes for operational tooling
============================================================*/

use std::io;
use std::process::ExitCode;

use thiserror::Error;

use crate::selection::SelectionError;

/// Result alias for Syn-Seek operations.
pub type Result<T> = std::result::Result<T, SynseekError>;

/// Enumerates high-level error domains surfaced by Syn-Seek.
#[derive(Debug, Error)]
pub enum SynseekError {
    #[error("Required command `{command}` not found in PATH")]
    CommandMissing { command: String },
    #[error("Command `{command}` failed with status {status}: {stderr}")]
    CommandFailure {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Selection: {0}")]
    Selection(#[from] SelectionError),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error("Runtime: {0}")]
    Runtime(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SynseekError {
    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SynseekError::Selection(_) => ExitCode::from(2),
            SynseekError::CommandMissing { .. } => ExitCode::from(10),
            SynseekError::CommandFailure { .. } => ExitCode::from(11),
            SynseekError::Config(_) => ExitCode::from(20),
            SynseekError::Serialization(_) => ExitCode::from(31),
            SynseekError::Filesystem(_) => ExitCode::from(40),
            SynseekError::Io(_) => ExitCode::from(41),
            SynseekError::Runtime(_) => ExitCode::from(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_errors_convert_and_keep_token() {
        let err: SynseekError = SelectionError::InvalidToken {
            token: "x".into(),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::from(2));
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn missing_command_names_binary() {
        let err = SynseekError::CommandMissing {
            command: "pacaur".into(),
        };
        assert_eq!(err.exit_code(), ExitCode::from(10));
        assert_eq!(
            err.to_string(),
            "Required command `pacaur` not found in PATH"
        );
    }
}
