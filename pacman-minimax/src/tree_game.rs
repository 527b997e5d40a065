//! An explicit game tree that implements the state interface
//!
//! Every node lists the actions available from it and the node each action leads to. Whose turn
//! it is at a node is implied by the search's turn order, so the tree itself doesn't record it.
//! This is handy for reproducing a tricky position by hand and for checking the algorithms against
//! each other.
//!
//! ```rust
//! use pacman_minimax::TreeGame;
//!
//! let game: TreeGame = serde_json::from_str(r#"{
//!   "agents": 2,
//!   "root": {
//!     "children": [
//!       { "action": "A", "node": { "children": [{ "action": "a", "node": { "score": 5.0 } }] } },
//!       { "action": "B", "node": { "outcome": "win", "score": 100.0 } }
//!     ]
//!   }
//! }"#).unwrap();
//!
//! assert_eq!(game.legal_action_names(), vec!["A", "B"]);
//! ```

use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::TreeError;
use crate::types::{
    AgentCountableGame, AgentIndex, ScoreGettableGame, SimulableGame, VictorDeterminableGame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a terminal node ended for the protagonist
pub enum Outcome {
    /// The protagonist won
    Win,
    /// The protagonist lost
    Lose,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
/// One state in an explicit game tree
///
/// Sibling actions must have distinct names, deserializing a node with a repeated action name
/// fails with [TreeError::DuplicateAction].
pub struct TreeNode {
    /// Score of this state, used whenever the search stops here
    #[serde(default)]
    pub score: f64,
    /// Set for win/lose states
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// The legal actions from this state, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// An action and the state it leads to
pub struct TreeEdge {
    /// The name of the action
    pub action: String,
    /// The resulting state
    pub node: Arc<TreeNode>,
}

impl TreeNode {
    /// A state with no actions
    pub fn leaf(score: f64) -> Self {
        Self {
            score,
            ..Default::default()
        }
    }

    /// A state the protagonist has won
    pub fn win(score: f64) -> Self {
        Self {
            score,
            outcome: Some(Outcome::Win),
            children: vec![],
        }
    }

    /// A state the protagonist has lost
    pub fn lose(score: f64) -> Self {
        Self {
            score,
            outcome: Some(Outcome::Lose),
            children: vec![],
        }
    }

    /// A state with the given actions
    ///
    /// # Panics
    ///
    /// If two of the actions share a name. Use [TreeNode::try_branch] to get an error instead
    pub fn branch<A: Into<String>>(
        score: f64,
        children: impl IntoIterator<Item = (A, TreeNode)>,
    ) -> Self {
        Self::try_branch(score, children).unwrap_or_else(|e| panic!("{e}"))
    }

    /// A state with the given actions, rejecting repeated action names
    pub fn try_branch<A: Into<String>>(
        score: f64,
        children: impl IntoIterator<Item = (A, TreeNode)>,
    ) -> Result<Self, TreeError> {
        let children = children
            .into_iter()
            .map(|(action, node)| TreeEdge {
                action: action.into(),
                node: Arc::new(node),
            })
            .collect();

        Self::from_edges(score, None, children)
    }

    fn from_edges(
        score: f64,
        outcome: Option<Outcome>,
        children: Vec<TreeEdge>,
    ) -> Result<Self, TreeError> {
        for (i, edge) in children.iter().enumerate() {
            if children[..i].iter().any(|other| other.action == edge.action) {
                return Err(TreeError::DuplicateAction(edge.action.clone()));
            }
        }

        Ok(Self {
            score,
            outcome,
            children,
        })
    }

    /// A complete tree with `levels` layers of `branching` actions each
    ///
    /// Leaves are scored by calling `leaf_score` in left to right order. Inner nodes score 0.
    /// Actions are named after their position, `"0"`, `"1"`, ...
    pub fn uniform(levels: usize, branching: usize, leaf_score: &mut impl FnMut() -> f64) -> Self {
        if levels == 0 {
            return Self::leaf(leaf_score());
        }

        Self::branch(
            0.0,
            (0..branching)
                .map(|i| (i.to_string(), Self::uniform(levels - 1, branching, &mut *leaf_score)))
                .collect::<Vec<_>>(),
        )
    }
}

/// The wire shape of a [TreeNode], checked before it becomes one
#[derive(Deserialize)]
struct UncheckedTreeNode {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    outcome: Option<Outcome>,
    #[serde(default)]
    children: Vec<TreeEdge>,
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let unchecked = UncheckedTreeNode::deserialize(deserializer)?;

        TreeNode::from_edges(unchecked.score, unchecked.outcome, unchecked.children)
            .map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A position in an explicit game tree
///
/// Successors share their subtree with the parent, so stepping through the tree never copies it.
pub struct TreeGame {
    #[serde(rename = "agents")]
    num_agents: usize,
    #[serde(rename = "root")]
    node: Arc<TreeNode>,
}

impl TreeGame {
    /// Start a game at `root` with the given number of agents taking turns
    pub fn new(num_agents: usize, root: TreeNode) -> Self {
        Self {
            num_agents,
            node: Arc::new(root),
        }
    }

    /// The current node
    pub fn node(&self) -> &TreeNode {
        &self.node
    }

    /// Shorthand for the current node's score
    pub fn node_score(&self) -> f64 {
        self.node.score
    }

    /// The action names available from the current node
    pub fn legal_action_names(&self) -> Vec<&str> {
        self.node
            .children
            .iter()
            .map(|edge| edge.action.as_str())
            .collect()
    }
}

impl AgentCountableGame for TreeGame {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl SimulableGame for TreeGame {
    type Action = String;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Self::Action> {
        self.node
            .children
            .iter()
            .map(|edge| edge.action.clone())
            .collect()
    }

    /// # Panics
    ///
    /// If `action` isn't one of this node's actions
    fn successor(&self, _agent: AgentIndex, action: &Self::Action) -> Self {
        let edge = self
            .node
            .children
            .iter()
            .find(|edge| &edge.action == action)
            .unwrap_or_else(|| panic!("{action:?} is not a legal action from this node"));

        Self {
            num_agents: self.num_agents,
            node: Arc::clone(&edge.node),
        }
    }
}

impl VictorDeterminableGame for TreeGame {
    fn is_win(&self) -> bool {
        self.node.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node.outcome == Some(Outcome::Lose)
    }
}

impl ScoreGettableGame for TreeGame {
    fn score(&self) -> f64 {
        self.node.score
    }
}
