#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements adversarial tree search for turn based games with one maximizing agent
//! and any number of adversaries. You provide a 'scoring' function that turns a game state into an
//! `f64`, higher being better for the maximizing agent.
//!
//! The game itself is never implemented here. It is consumed through the small traits in
//! [types], so anything that can list legal actions and produce successor states can be searched.

pub mod types;

mod error;
pub use error::{ConfigError, SearchError, TreeError};

mod score;
pub use score::{CountingScore, Scorable};

pub mod search;
pub use search::{Algorithm, MinMaxReturn, SearchAgent, SearchOptions};

mod tree_game;
pub use tree_game::{Outcome, TreeEdge, TreeGame, TreeNode};
