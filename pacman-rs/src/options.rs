use pacman_minimax::ConfigError as SearchConfigError;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, evaluation::EvaluationFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// How a search agent is configured
///
/// The defaults are the plain score heuristic searched two rounds deep
/// ```
/// use pacman_rs::{evaluation::EvaluationFunction, AgentOptions};
///
/// let options = AgentOptions::default();
///
/// assert_eq!(options.evaluation, EvaluationFunction::Score);
/// assert_eq!(options.depth, 2);
/// ```
pub struct AgentOptions {
    /// The leaf heuristic
    pub evaluation: EvaluationFunction,
    /// How many full rounds to look ahead
    pub depth: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            evaluation: EvaluationFunction::Score,
            depth: 2,
        }
    }
}

impl AgentOptions {
    /// Build options from their textual form, like `("betterEvaluationFunction", "3")`
    pub fn from_args(eval_fn: &str, depth: &str) -> Result<Self, ConfigError> {
        let evaluation = eval_fn.parse()?;
        let depth = depth
            .trim()
            .parse::<usize>()
            .map_err(|_| SearchConfigError::InvalidDepth(depth.to_owned()))?;

        Self::new(evaluation, depth)
    }

    /// Build options, rejecting a depth of zero
    pub fn new(evaluation: EvaluationFunction, depth: usize) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(SearchConfigError::NonPositiveDepth(depth).into());
        }

        Ok(Self { evaluation, depth })
    }

    /// The preset used when playing a game for show: the better heuristic two rounds deep
    pub fn demo() -> Self {
        Self {
            evaluation: EvaluationFunction::Better,
            depth: 2,
        }
    }
}
