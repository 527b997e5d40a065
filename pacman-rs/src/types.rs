//! Grid features the Pacman evaluators read from a state
//!
//! Like the engine's state interface, each feature is its own small trait. [PacmanGame] ties them
//! together with the engine traits and is implemented automatically for anything that has them
//! all.

use std::fmt;

use pacman_minimax::types::{
    AgentCountableGame, ScoreGettableGame, SimulableGame, VictorDeterminableGame,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A cell on the board, in integer grid coordinates
pub struct Position {
    /// Column
    pub x: i32,
    /// Row, growing northwards
    pub y: i32,
}

impl Position {
    /// Build a position from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The taxicab distance between the two positions
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The position one step in `direction` from here. [Direction::Stop] stays put
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.to_vector();

        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The actions available to every agent on the board
pub enum Direction {
    North,
    South,
    East,
    West,
    /// Stay where you are
    Stop,
}

impl Direction {
    /// The four moving directions
    pub fn all_moves() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    /// The change in `(x, y)` taking this action causes
    pub fn to_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// What the evaluators need to know about one ghost
pub struct GhostState {
    /// Where the ghost is
    pub position: Position,
    /// Turns left until the ghost is dangerous again. Zero means it is dangerous now
    pub scared_timer: u32,
}

impl GhostState {
    /// A scared ghost can be eaten, any other ghost is a threat
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// Games that know where Pacman is
pub trait PacmanPositionGettableGame {
    /// Pacman's current cell
    fn pacman_position(&self) -> Position;
}

/// Games that have food pellets on the board
pub trait FoodGettableGame {
    /// Every remaining food pellet
    fn food(&self) -> Vec<Position>;
}

/// Games that have power capsules on the board
pub trait CapsuleGettableGame {
    /// Every remaining capsule
    fn capsules(&self) -> Vec<Position>;
}

/// Games that have ghosts in them
pub trait GhostGettableGame {
    /// One entry per ghost, in agent order. Ghost `i` is agent `i + 1`
    fn ghost_states(&self) -> Vec<GhostState>;
}

/// Everything the Pacman agents need from a state
pub trait PacmanGame:
    SimulableGame<Action = Direction>
    + AgentCountableGame
    + VictorDeterminableGame
    + ScoreGettableGame
    + PacmanPositionGettableGame
    + FoodGettableGame
    + CapsuleGettableGame
    + GhostGettableGame
    + Clone
{
}

impl<T> PacmanGame for T where
    T: SimulableGame<Action = Direction>
        + AgentCountableGame
        + VictorDeterminableGame
        + ScoreGettableGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + CapsuleGettableGame
        + GhostGettableGame
        + Clone
{
}
