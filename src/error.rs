//! Error types
//!
//! Library-level errors are typed with `thiserror`; binaries and the TUI
//! runner wrap them in `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes, used as process exit statuses by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Config = 10,
    Io = 20,
    Transport = 30,
    AnswersFile = 40,
    Terminal = 50,
    Validation = 60,
}

impl ErrorCode {
    pub fn exit_status(self) -> i32 {
        self as i32
    }
}

/// Failure to get a parseable response from the application endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("invalid response body: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum PartnerApplyError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("cannot read answers file {path:?}: {reason}")]
    AnswersFile { path: PathBuf, reason: String },

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("application is incomplete: step {step} has errors")]
    Validation { step: usize },
}

impl PartnerApplyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::Config,
            Self::Io { .. } => ErrorCode::Io,
            Self::Transport(_) => ErrorCode::Transport,
            Self::AnswersFile { .. } => ErrorCode::AnswersFile,
            Self::Terminal(_) => ErrorCode::Terminal,
            Self::Validation { .. } => ErrorCode::Validation,
        }
    }
}
