use molt_core::{AgentId, NodeId};
use molt_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("cannot spawn on {0}: node not in graph")]
    UnknownNode(String),

    #[error("occupancy audit failed at {node}: {detail}")]
    Audit { node: NodeId, detail: String },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type AgentResult<T> = Result<T, AgentError>;
