//! Compiler error types

use thiserror::Error;

use crate::template::pipeline::ir::{OpKind, XrefId};

/// A broken IR invariant detected by a phase.
///
/// These indicate a bug in an earlier phase rather than in user input, and are never recovered from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("AssertionError: pipes cannot be used inside child operations (pipe `{name}`)")]
    PipeInChildOperation { name: String },

    #[error(
        "AssertionError: pipe `{name}` used in a {kind:?} op which neither depends on slot context nor uses a slot index"
    )]
    PipeOnNonSlotOperation { name: String, kind: OpKind },

    #[error("AssertionError: unable to find the creation op for xref {target} to anchor pipe `{name}`")]
    MissingPipeAnchor { name: String, target: XrefId },
}

/// Error type for the template pipeline
#[derive(Error, Debug)]
pub enum CompilerError {
    /// An IR invariant failed
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// Pipeline configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl CompilerError {
    /// Whether this error signals a compiler bug, as opposed to bad configuration.
    pub fn is_internal(&self) -> bool {
        matches!(self, CompilerError::Internal(_))
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, CompilerError>;
