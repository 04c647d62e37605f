use molt_agent::AgentError;
use molt_graph::GraphError;
use molt_ritual::RitualError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("ritual error: {0}")]
    Ritual(#[from] RitualError),
}

pub type SimResult<T> = Result<T, SimError>;
