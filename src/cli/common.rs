//! Shared error and exit code types for CLI commands.

use std::fmt;

/// Process exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (bad JSON, missing fields, unknown layout, ...)
    ValidationError = 1,
    /// Reading stdin or writing stdout failed
    IoError = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Input validation failure
    Validation,
    /// I/O failure
    Io,
}

/// Error returned by CLI command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category, determines the exit code
    pub kind: CliErrorKind,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Exit code the process should terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;
