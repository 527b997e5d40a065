use thiserror::Error;

/// An agent couldn't be built from the given configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Search(#[from] pacman_minimax::ConfigError),

    #[error("unknown evaluation function {0:?}, expected one of score, better")]
    UnknownEvaluationFunction(String),

    #[error("unknown agent {0:?}, expected one of {1}")]
    UnknownAgent(String, String),
}

/// An agent failed to pick a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("tree search failed")]
    Search(#[from] pacman_minimax::SearchError),

    #[error("pacman has no legal actions")]
    NoLegalActions,
}
