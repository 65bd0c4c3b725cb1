//! Error types for binding ordering

use super::value_objects::VertexId;
use thiserror::Error;

/// All errors that can end a sort call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// Two items in one group resolved to the same identifier
    #[error("Multiple items have the same identifier: {identifier}")]
    DuplicateIdentifier { identifier: String },

    /// An explicit constraint would close a cycle
    #[error("Cycle detected between {from} and {to}")]
    CycleDetected { from: String, to: String },

    /// A before/after reference matches no item in the group
    #[error("Unable to resolve {identifier} (referenced by {referenced_by}) as an item of the group")]
    UnresolvableIdentifier {
        identifier: String,
        referenced_by: String,
    },

    /// An identifier rewrite chain came back to an identifier it already produced
    #[error("Identifier rewrite loop at {identifier}")]
    RewriteLoop { identifier: String },

    /// A rewrite step could not be applied
    #[error("Cannot rewrite identifier {identifier}: {reason}")]
    InvalidRewrite { identifier: String, reason: String },

    /// Internal invariant broken
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by [`ConstraintGraph`](super::entities::ConstraintGraph) mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Adding `from -> to` would close a cycle
    #[error("Edge {from} -> {to} would close a cycle")]
    WouldCycle { from: VertexId, to: VertexId },

    #[error("Unknown vertex {0}")]
    UnknownVertex(VertexId),
}

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, SortError>;
