//! Multi-agent tree search with one maximizing agent and any number of adversaries.
//!
//! Agents take turns in index order. Agent `0` is the protagonist, and its layers always pick the
//! child with the highest value. The adversary layers depend on the [Algorithm]:
//!
//! - [Algorithm::Minimax] assumes every adversary works to minimize the protagonist's value
//! - [Algorithm::AlphaBeta] gives the same answer as Minimax, but skips siblings that can no longer
//!   change the result
//! - [Algorithm::Expectimax] assumes adversaries pick uniformly at random, so their layers take the
//!   average of their children
//!
//! The depth counts full rounds. It only goes up once the last adversary has moved and it is the
//! protagonist's turn again. Every search is one recursive walk that holds a single state per stack
//! frame and never mutates the state it was given.
//!
//! ```rust
//! use pacman_minimax::{Algorithm, SearchAgent, SearchOptions, TreeGame};
//!
//! // This fixture has two adversary replies under A (10 and -10) and two under B (8 and 8)
//! let game: TreeGame =
//!     serde_json::from_str(include_str!("../../fixtures/scenario_two.json")).unwrap();
//!
//! let score_function = |game: &TreeGame| game.node_score();
//!
//! let minimax = SearchAgent::new(
//!     score_function,
//!     "minimax",
//!     SearchOptions { algorithm: Algorithm::Minimax, depth: 1 },
//! )
//! .unwrap();
//! let result = minimax.search(&game).unwrap();
//!
//! assert_eq!(result.score(), 8.0);
//! assert_eq!(result.chosen_action(), Some(&"B".to_owned()));
//! ```

mod strategy;
pub use strategy::{Algorithm, Bounds, LayerKind};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod eval;
pub use eval::{SearchAgent, SearchOptions};
