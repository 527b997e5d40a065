use std::{fmt, ops::ControlFlow, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::ConfigError,
    types::{AgentIndex, PROTAGONIST},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which tree search to run
///
/// All three share the same recursion and only differ in how a layer turns its children's
/// values into its own value.
pub enum Algorithm {
    /// Adversaries minimize the protagonist's value
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// Adversaries pick uniformly at random, so their layer is the average of its children
    Expectimax,
}

impl Algorithm {
    /// Every algorithm, in the order we usually report them
    pub fn all() -> [Algorithm; 3] {
        [Algorithm::Minimax, Algorithm::AlphaBeta, Algorithm::Expectimax]
    }

    /// The name used in configuration and traces
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Expectimax => "expectimax",
        }
    }

    /// How the given agent's layer aggregates its children under this algorithm
    pub fn layer_for(self, agent: AgentIndex) -> LayerKind {
        match (self, agent == PROTAGONIST) {
            (Algorithm::Minimax | Algorithm::Expectimax, true) => LayerKind::Maximize,
            (Algorithm::AlphaBeta, true) => LayerKind::BoundedMaximize,
            (Algorithm::Minimax, false) => LayerKind::Minimize,
            (Algorithm::AlphaBeta, false) => LayerKind::BoundedMinimize,
            (Algorithm::Expectimax, false) => LayerKind::Expectation,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Algorithm::AlphaBeta),
            "expectimax" => Ok(Algorithm::Expectimax),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The aggregation rule of a single layer of the search tree
pub enum LayerKind {
    /// Keep the strictly largest child value, first seen wins ties
    Maximize,
    /// Keep the strictly smallest child value, first seen wins ties
    Minimize,
    /// [LayerKind::Maximize], but stop looking at siblings once a child beats `beta`
    BoundedMaximize,
    /// [LayerKind::Minimize], but stop looking at siblings once a child is below `alpha`
    BoundedMinimize,
    /// Average of all the children. Has no chosen action
    Expectation,
}

impl LayerKind {
    /// Is this a layer for the protagonist
    pub fn is_maximizing(self) -> bool {
        matches!(self, LayerKind::Maximize | LayerKind::BoundedMaximize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The alpha-beta window threaded through the recursion
///
/// `alpha` is the best value the protagonist can already guarantee on this path, `beta` the best
/// value the adversaries can already guarantee.
pub struct Bounds {
    /// Lower bound
    pub alpha: f64,
    /// Upper bound
    pub beta: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }
}

/// Folds the child values of one node into the node's value
///
/// Children are fed in exploration order. A [ControlFlow::Break] from [Layer::observe] means the
/// remaining siblings must not be explored at all.
#[derive(Debug)]
pub(crate) struct Layer {
    kind: LayerKind,
    bounds: Bounds,
    best: Option<(f64, usize)>,
    sum: f64,
    observed: usize,
}

impl Layer {
    pub(crate) fn new(kind: LayerKind, bounds: Bounds) -> Self {
        Self {
            kind,
            bounds,
            best: None,
            sum: 0.0,
            observed: 0,
        }
    }

    /// The window children of this node should be searched with
    pub(crate) fn child_bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn observe(&mut self, index: usize, value: f64) -> ControlFlow<()> {
        self.observed += 1;

        match self.kind {
            LayerKind::Maximize | LayerKind::BoundedMaximize => {
                if self.best.map_or(true, |(best, _)| value > best) {
                    self.best = Some((value, index));
                }
            }
            LayerKind::Minimize | LayerKind::BoundedMinimize => {
                if self.best.map_or(true, |(best, _)| value < best) {
                    self.best = Some((value, index));
                }
            }
            LayerKind::Expectation => {
                self.sum += value;
            }
        }

        match self.kind {
            LayerKind::BoundedMaximize => {
                if value > self.bounds.beta {
                    trace!(value, beta = self.bounds.beta, "beta cutoff");
                    return ControlFlow::Break(());
                }
                self.bounds.alpha = self.bounds.alpha.max(value);
            }
            LayerKind::BoundedMinimize => {
                if value < self.bounds.alpha {
                    trace!(value, alpha = self.bounds.alpha, "alpha cutoff");
                    return ControlFlow::Break(());
                }
                self.bounds.beta = self.bounds.beta.min(value);
            }
            _ => {}
        }

        ControlFlow::Continue(())
    }

    /// The value of the node, and the index of the chosen child if the layer chooses one
    ///
    /// Must only be called after at least one child was observed.
    pub(crate) fn finish(self) -> (f64, Option<usize>) {
        match self.kind {
            LayerKind::Expectation => (self.sum / self.observed as f64, None),
            _ => match self.best {
                Some((value, index)) => (value, Some(index)),
                None => (f64::NAN, None),
            },
        }
    }
}
