#![forbid(unsafe_code)]

//! Unified error type.
//!
//! Engine operations never fail; only loading declarative sources and the
//! host's own I/O do. Each crate keeps its own typed error and this enum
//! wraps them so applications can use `?` across the whole surface.

use coachmark_core::{ConfigError, StepSourceError};

/// Top-level error type for coachmark hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The step declaration source could not be used.
    #[error(transparent)]
    StepSource(#[from] StepSourceError),
    /// The walkthrough configuration could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Host I/O, e.g. writing frames.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether a fallback value would let the host carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::StepSource(_) | Self::Config(_))
    }

    /// Process exit code for command-line hosts.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::StepSource(_) => 3,
            Self::Config(_) => 4,
        }
    }
}

/// Standard result type for coachmark APIs.
pub type Result<T> = std::result::Result<T, Error>;
