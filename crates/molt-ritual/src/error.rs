use molt_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RitualError {
    #[error("ritual script error: {0}")]
    Config(String),

    #[error("script references {0}")]
    Graph(#[from] GraphError),
}

pub type RitualResult<T> = Result<T, RitualError>;
