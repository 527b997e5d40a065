//! The state interface the search engine consumes.
//!
//! The engine never implements game mechanics itself. Each capability it needs is its own small
//! trait so that a game only has to provide what a given search or evaluation uses.

use std::fmt::Debug;

/// Identifies whose turn it is. `0` is always the maximizing agent, every other index is an
/// adversary
pub type AgentIndex = usize;

/// The agent index of the single maximizing agent
pub const PROTAGONIST: AgentIndex = 0;

/// A game that knows how many agents take turns in it
pub trait AgentCountableGame {
    /// Total number of agents, protagonist included. Must be at least 1
    fn num_agents(&self) -> usize;
}

/// A game that can list the legal actions for an agent and produce successor states
pub trait SimulableGame: Sized {
    /// One legal move for one agent
    type Action: Clone + PartialEq + Debug;

    /// The legal actions for `agent`. Only expected to be empty for terminal states
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state after `agent` takes `action`
    ///
    /// This must return a brand new state and leave `self` untouched, sibling branches of the
    /// search each hold their own successor.
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;
}

/// A game that can tell if it has been won or lost by the protagonist
pub trait VictorDeterminableGame {
    /// The protagonist has won
    fn is_win(&self) -> bool;

    /// The protagonist has lost
    fn is_lose(&self) -> bool;

    /// Either of the above
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game that carries its own running score
pub trait ScoreGettableGame {
    /// The intrinsic score of this state
    fn score(&self) -> f64;
}
