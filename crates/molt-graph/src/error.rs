//! Graph error type.

use thiserror::Error;

use molt_core::{AgentId, MoltError, NodeId};

/// Errors produced while building or configuring a `PathGraph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node key {0:?} is already in the graph")]
    DuplicateNode(String),

    #[error("node key {0:?} not found in graph")]
    UnknownKey(String),

    #[error("{node} is already occupied by {by}")]
    Occupied { node: NodeId, by: AgentId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("layout CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MoltError> for GraphError {
    fn from(e: MoltError) -> Self {
        match e {
            MoltError::NodeNotFound(id) => GraphError::NodeNotFound(id),
            MoltError::Io(io) => GraphError::Io(io),
            other => GraphError::Parse(other.to_string()),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
