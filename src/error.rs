//! Error types for the qualtype inference engine.

use thiserror::Error;

/// Result type for qualtype operations.
pub type Result<T> = std::result::Result<T, TypeError>;

/// Type checking errors.
///
/// Every variant carries a `context` describing what was being checked when
/// the error arose, so the host editor can point at the offending
/// connection or block. Errors are deterministic: re-running the same
/// inference reproduces the same error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown name '{name}' (while checking {context})")]
    UnboundName { name: String, context: String },

    #[error("{what} arity mismatch: expected {expected}, found {found} (while checking {context})")]
    ArityMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
        context: String,
    },

    #[error("no instance of {class} for {ty} (while checking {context})")]
    MissingInstance {
        class: String,
        ty: String,
        context: String,
    },

    #[error("cannot match {left} with {right} (while checking {context})")]
    StructuralMismatch {
        left: String,
        right: String,
        context: String,
    },

    #[error("unknown type class '{name}' (while checking {context})")]
    UnknownClass { name: String, context: String },

    #[error("cannot construct the infinite type {var} ~ {ty} (while checking {context})")]
    InfiniteType {
        var: String,
        ty: String,
        context: String,
    },
}

impl TypeError {
    /// The context description attached to this error.
    pub fn context(&self) -> &str {
        match self {
            TypeError::UnboundName { context, .. }
            | TypeError::ArityMismatch { context, .. }
            | TypeError::MissingInstance { context, .. }
            | TypeError::StructuralMismatch { context, .. }
            | TypeError::UnknownClass { context, .. }
            | TypeError::InfiniteType { context, .. } => context,
        }
    }
}
