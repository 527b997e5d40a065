use std::{borrow::Cow, cell::Cell, ops::ControlFlow};

use derivative::Derivative;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use crate::{
    error::{ConfigError, SearchError},
    score::Scorable,
    types::{
        AgentCountableGame, AgentIndex, SimulableGame, VictorDeterminableGame, PROTAGONIST,
    },
};

use super::{
    strategy::{Bounds, Layer},
    Algorithm, MinMaxReturn,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// The static configuration of a [SearchAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacman_minimax::{Algorithm, SearchOptions};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.algorithm, Algorithm::Minimax);
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchOptions {
    /// Which search to run
    pub algorithm: Algorithm,
    /// How many full rounds to look ahead. A round is the protagonist moving once and then every
    /// adversary moving once
    ///
    /// Defaults to 2
    pub depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Minimax,
            depth: 2,
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a scoring function and a search configuration and can be used to
/// pick actions
///
/// It holds no game state, every call to [SearchAgent::choose_action] is independent.
/// It also outputs traces using the [tracing] crate.
///
/// ```rust
/// use pacman_minimax::{Algorithm, SearchAgent, SearchOptions, TreeGame, TreeNode};
///
/// let game = TreeGame::new(
///     2,
///     TreeNode::branch(
///         0.0,
///         [
///             ("A", TreeNode::branch(0.0, [("a", TreeNode::leaf(5.0))])),
///             ("B", TreeNode::branch(0.0, [("b", TreeNode::leaf(9.0))])),
///         ],
///     ),
/// );
///
/// let agent = SearchAgent::new(
///     |game: &TreeGame| game.node_score(),
///     "example",
///     SearchOptions { algorithm: Algorithm::AlphaBeta, depth: 1 },
/// )
/// .unwrap();
///
/// assert_eq!(agent.choose_action(&game).unwrap(), Some("B".to_owned()));
/// ```
pub struct SearchAgent<ScorableType> {
    /// Used in traces to tell agents apart
    pub name: &'static str,
    options: SearchOptions,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
}

/// How much of the explored tree a search hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retention {
    /// Every explored node, for inspecting the search
    FullTree,
    /// Only the root and a summary of each of its children, enough to pick an action
    RootOnly,
}

/// What is fixed for the duration of one search
#[derive(Debug, Clone, Copy)]
struct SearchContext<'a> {
    num_agents: usize,
    max_depth: usize,
    retention: Retention,
    leaves_evaluated: &'a Cell<usize>,
}

impl<ScorableType> SearchAgent<ScorableType> {
    /// Construct a new `SearchAgent`, checking the options are usable
    pub fn new(
        score_function: ScorableType,
        name: &'static str,
        options: SearchOptions,
    ) -> Result<Self, ConfigError> {
        if options.depth == 0 {
            return Err(ConfigError::NonPositiveDepth(options.depth));
        }

        Ok(Self {
            name,
            options,
            score_function,
        })
    }

    /// The options this agent was built with
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// The leaf evaluation function
    pub fn score_function(&self) -> &ScorableType {
        &self.score_function
    }

    /// Pick the action the protagonist should take in `game`
    ///
    /// Returns `Ok(None)` if `game` is already won or lost, there is nothing to choose then.
    pub fn choose_action<GameType>(
        &self,
        game: &GameType,
    ) -> Result<Option<GameType::Action>, SearchError>
    where
        GameType: SimulableGame + AgentCountableGame + VictorDeterminableGame + Clone,
        ScorableType: Scorable<GameType>,
    {
        let span = info_span!(
            "tree_search",
            agent_name = self.name,
            algorithm = %self.options.algorithm,
            depth = self.options.depth,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            leaves_evaluated = tracing::field::Empty,
        );

        span.in_scope(|| -> Result<Option<GameType::Action>, SearchError> {
            let (result, leaves_evaluated) = self.run_search(game, Retention::RootOnly)?;
            let chosen_action = result.chosen_action().cloned();

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", result.score());
            current_span.record("chosen_action", format!("{:?}", chosen_action).as_str());
            current_span.record("leaves_evaluated", leaves_evaluated);

            info!(
                score = result.score(),
                action = ?chosen_action,
                leaves_evaluated,
                "finished tree search"
            );

            Ok(chosen_action)
        })
    }

    /// This runs the configured search to the configured depth, returning a struct that contains
    /// all the information about the 'tree' we searched.
    ///
    /// The return value is a recursive struct that tells you the score of the current node, and
    /// the score of all its children nodes.
    ///
    /// The whole explored tree is kept, so memory grows with the number of nodes visited.
    /// [SearchAgent::choose_action] only keeps what it needs to pick the root action.
    pub fn search<GameType>(
        &self,
        game: &GameType,
    ) -> Result<MinMaxReturn<GameType::Action>, SearchError>
    where
        GameType: SimulableGame + AgentCountableGame + VictorDeterminableGame + Clone,
        ScorableType: Scorable<GameType>,
    {
        self.run_search(game, Retention::FullTree).map(|(result, _)| result)
    }

    /// Runs the search, returning the result and how many leaves were scored
    fn run_search<GameType>(
        &self,
        game: &GameType,
        retention: Retention,
    ) -> Result<(MinMaxReturn<GameType::Action>, usize), SearchError>
    where
        GameType: SimulableGame + AgentCountableGame + VictorDeterminableGame + Clone,
        ScorableType: Scorable<GameType>,
    {
        let num_agents = game.num_agents();
        if num_agents == 0 {
            warn!("the game reported zero agents");
            return Err(SearchError::NoAgents);
        }

        let leaves_evaluated = Cell::new(0);
        let context = SearchContext {
            num_agents,
            max_depth: self.options.depth,
            retention,
            leaves_evaluated: &leaves_evaluated,
        };

        let result = self.search_node(
            Cow::Borrowed(game),
            PROTAGONIST,
            0,
            Bounds::default(),
            context,
        )?;

        Ok((result, leaves_evaluated.get()))
    }

    fn search_node<GameType>(
        &self,
        node: Cow<GameType>,
        agent: AgentIndex,
        depth: usize,
        bounds: Bounds,
        context: SearchContext<'_>,
    ) -> Result<MinMaxReturn<GameType::Action>, SearchError>
    where
        GameType: SimulableGame + VictorDeterminableGame + Clone,
        ScorableType: Scorable<GameType>,
    {
        if node.is_win() || node.is_lose() || depth == context.max_depth {
            context.leaves_evaluated.set(context.leaves_evaluated.get() + 1);

            return Ok(MinMaxReturn::Leaf {
                score: self.score_function.score(&*node),
                depth,
            });
        }

        let legal_actions = node.legal_actions(agent);
        if legal_actions.is_empty() {
            warn!(agent, depth, "no legal actions in a non-terminal state");
            return Err(SearchError::NoLegalActions { agent, depth });
        }

        let (next_agent, next_depth) = if agent + 1 >= context.num_agents {
            (PROTAGONIST, depth + 1)
        } else {
            (agent + 1, depth)
        };

        let kind = self.options.algorithm.layer_for(agent);
        let mut layer = Layer::new(kind, bounds);
        let mut options = Vec::with_capacity(legal_actions.len());
        let mut alpha_beta_cutoff = false;

        for (index, action) in legal_actions.into_iter().enumerate() {
            let successor = node.successor(agent, &action);
            let child = self.search_node(
                Cow::Owned(successor),
                next_agent,
                next_depth,
                layer.child_bounds(),
                context,
            )?;
            let value = child.score();
            let child = match context.retention {
                Retention::FullTree => child,
                Retention::RootOnly => child.summarized(),
            };
            options.push((action, child));

            if let ControlFlow::Break(()) = layer.observe(index, value) {
                alpha_beta_cutoff = true;
                break;
            }
        }

        let (score, chosen) = layer.finish();

        Ok(MinMaxReturn::Node {
            layer: kind,
            agent,
            depth,
            options,
            chosen,
            score,
            alpha_beta_cutoff,
        })
    }
}
