//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `MoltError` via `From` or wrap it as one variant.

use thiserror::Error;

use crate::{AgentId, NodeId};

/// The top-level error type for `molt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MoltError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `molt-*` crates.
pub type MoltResult<T> = Result<T, MoltError>;
