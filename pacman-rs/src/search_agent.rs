//! Pacman agents backed by the tree searches in [pacman_minimax]
//!
//! Pacman is agent `0` and every ghost is an adversary, moving in index order.

use pacman_minimax::{Algorithm, SearchAgent, SearchOptions};
use tracing::info;

use crate::{
    error::{AgentError, ConfigError},
    evaluation::EvaluationFunction,
    types::{Direction, PacmanGame},
    AgentFactory, AgentOptions, BoxedAgent, PacmanAgent,
};

#[derive(Debug, Clone)]
/// Picks Pacman's direction with one of the tree searches
pub struct SearchPacman {
    search: SearchAgent<EvaluationFunction>,
}

impl SearchPacman {
    /// Validates the options and builds the agent
    pub fn new(algorithm: Algorithm, options: AgentOptions) -> Result<Self, ConfigError> {
        let search = SearchAgent::new(
            options.evaluation,
            algorithm.name(),
            SearchOptions {
                algorithm,
                depth: options.depth,
            },
        )?;

        Ok(Self { search })
    }

    /// Assumes every ghost plays optimally against Pacman
    pub fn minimax(options: AgentOptions) -> Result<Self, ConfigError> {
        Self::new(Algorithm::Minimax, options)
    }

    /// Same choices as [SearchPacman::minimax], exploring fewer states
    pub fn alpha_beta(options: AgentOptions) -> Result<Self, ConfigError> {
        Self::new(Algorithm::AlphaBeta, options)
    }

    /// Assumes every ghost moves uniformly at random
    pub fn expectimax(options: AgentOptions) -> Result<Self, ConfigError> {
        Self::new(Algorithm::Expectimax, options)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.search.options().algorithm
    }

    pub fn depth(&self) -> usize {
        self.search.options().depth
    }

    pub fn evaluation(&self) -> EvaluationFunction {
        *self.search.score_function()
    }
}

impl<G: PacmanGame> PacmanAgent<G> for SearchPacman {
    fn name(&self) -> &str {
        self.search.name
    }

    /// A game that is already over has nothing left to choose, so Pacman stops
    fn choose_action(&self, game: &G) -> Result<Direction, AgentError> {
        let direction = self
            .search
            .choose_action(game)?
            .unwrap_or(Direction::Stop);

        info!(agent = self.search.name, %direction, "pacman moves");

        Ok(direction)
    }
}

#[derive(Debug, Clone, Copy)]
/// Builds [SearchPacman]s that all use the same algorithm
pub struct SearchPacmanFactory {
    pub algorithm: Algorithm,
}

impl<G: PacmanGame> AgentFactory<G> for SearchPacmanFactory {
    fn name(&self) -> String {
        self.algorithm.to_string()
    }

    fn build(&self, options: AgentOptions) -> Result<BoxedAgent<G>, ConfigError> {
        Ok(Box::new(SearchPacman::new(self.algorithm, options)?))
    }
}
