use thiserror::Error;

use crate::types::AgentIndex;

/// Problems with how a [crate::SearchAgent] was configured
///
/// These are always reported when the agent is built, never part way through a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The search depth must be at least one full round
    #[error("search depth must be at least 1, got {0}")]
    NonPositiveDepth(usize),

    /// The depth could not be parsed as a non-negative integer
    #[error("invalid search depth {0:?}")]
    InvalidDepth(String),

    /// The name doesn't match any known search algorithm
    #[error("unknown search algorithm {0:?}, expected one of minimax, alphabeta, expectimax")]
    UnknownAlgorithm(String),
}

/// The game broke the contract the search relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A non-terminal state offered no legal actions to the agent whose turn it was
    #[error("agent {agent} has no legal actions in a non-terminal state at depth {depth}")]
    NoLegalActions {
        /// The agent whose turn it was
        agent: AgentIndex,
        /// The round the search was in
        depth: usize,
    },

    /// The state reported that nobody is playing
    #[error("the game reported zero agents")]
    NoAgents,
}

/// An explicit game tree that can't be searched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two actions under the same node share a name, so only the first could ever be taken
    #[error("action {0:?} appears more than once under the same node")]
    DuplicateAction(String),
}
