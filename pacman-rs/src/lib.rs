//! Pacman playing agents
//!
//! The game itself lives elsewhere. Anything implementing [types::PacmanGame] can be handed to
//! one of these agents once per turn to get Pacman's next [types::Direction].

use std::fmt::Debug;

use pacman_minimax::Algorithm;

pub mod evaluation;
pub mod reflex_agent;
pub mod search_agent;
pub mod types;

mod error;
pub use error::{AgentError, ConfigError};

mod options;
pub use options::AgentOptions;

#[cfg(test)]
mod test_board;

use crate::{
    reflex_agent::ReflexAgentFactory,
    search_agent::SearchPacmanFactory,
    types::{Direction, PacmanGame},
};

pub type BoxedAgent<G> = Box<dyn PacmanAgent<G> + Send + Sync>;
pub type BoxedFactory<G> = Box<dyn AgentFactory<G> + Send + Sync>;

/// Something that can steer Pacman
///
/// Agents keep no state between turns apart from how they were configured.
pub trait PacmanAgent<G>: Debug {
    fn name(&self) -> &str;

    /// Pick Pacman's direction for this turn
    fn choose_action(&self, game: &G) -> Result<Direction, AgentError>;
}

pub trait AgentFactory<G> {
    /// The name the agent is selected by
    fn name(&self) -> String;

    fn build(&self, options: AgentOptions) -> Result<BoxedAgent<G>, ConfigError>;
}

pub fn all_factories<G: PacmanGame>() -> Vec<BoxedFactory<G>> {
    vec![
        Box::new(SearchPacmanFactory {
            algorithm: Algorithm::Minimax,
        }),
        Box::new(SearchPacmanFactory {
            algorithm: Algorithm::AlphaBeta,
        }),
        Box::new(SearchPacmanFactory {
            algorithm: Algorithm::Expectimax,
        }),
        Box::new(ReflexAgentFactory {}),
    ]
}

/// Build the agent registered under `name`
///
/// ```
/// use pacman_rs::{agent_from_name, AgentOptions, PacmanAgent};
/// # use pacman_rs::types::*;
/// # use pacman_minimax::types::*;
/// # #[derive(Clone)]
/// # struct Board;
/// # impl AgentCountableGame for Board { fn num_agents(&self) -> usize { 1 } }
/// # impl SimulableGame for Board {
/// #     type Action = Direction;
/// #     fn legal_actions(&self, _: AgentIndex) -> Vec<Direction> { vec![Direction::Stop] }
/// #     fn successor(&self, _: AgentIndex, _: &Direction) -> Self { Board }
/// # }
/// # impl VictorDeterminableGame for Board {
/// #     fn is_win(&self) -> bool { false }
/// #     fn is_lose(&self) -> bool { false }
/// # }
/// # impl ScoreGettableGame for Board { fn score(&self) -> f64 { 0.0 } }
/// # impl PacmanPositionGettableGame for Board {
/// #     fn pacman_position(&self) -> Position { Position::new(0, 0) }
/// # }
/// # impl FoodGettableGame for Board { fn food(&self) -> Vec<Position> { vec![] } }
/// # impl CapsuleGettableGame for Board { fn capsules(&self) -> Vec<Position> { vec![] } }
/// # impl GhostGettableGame for Board { fn ghost_states(&self) -> Vec<GhostState> { vec![] } }
///
/// let agent = agent_from_name::<Board>("alphabeta", AgentOptions::demo()).unwrap();
///
/// assert_eq!(agent.name(), "alphabeta");
/// assert_eq!(agent.choose_action(&Board), Ok(Direction::Stop));
/// ```
pub fn agent_from_name<G: PacmanGame>(
    name: &str,
    options: AgentOptions,
) -> Result<BoxedAgent<G>, ConfigError> {
    let factories = all_factories::<G>();

    let factory = factories
        .iter()
        .find(|factory| factory.name() == name)
        .ok_or_else(|| {
            ConfigError::UnknownAgent(
                name.to_owned(),
                factories
                    .iter()
                    .map(|factory| factory.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })?;

    factory.build(options)
}
