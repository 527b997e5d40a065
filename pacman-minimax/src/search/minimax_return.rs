use std::fmt::Debug;
use text_trees::StringTreeNode;

use crate::types::AgentIndex;

use super::LayerKind;

#[derive(Debug, Clone, PartialEq)]
/// This is returned from every call of the tree search
/// It contains all the information we generated about the game tree below it
pub enum MinMaxReturn<Action> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// How this node aggregated its children
        layer: LayerKind,
        /// Whose turn it was at this node
        agent: AgentIndex,
        /// The round this node was in
        depth: usize,
        /// A 'recursive' look at all the actions under us, in the order they were explored
        ///
        /// When an alpha-beta cutoff happened the siblings after the cutoff are not in here, they
        /// were never explored
        options: Vec<(Action, Self)>,
        /// Index into `options` of the child that produced `score`
        /// `None` for expectation layers, which don't choose an action
        chosen: Option<usize>,
        /// The value of this node
        score: f64,
        /// Whether we stopped exploring siblings early
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose)
    /// or when we reach the maximum depth
    Leaf {
        /// The evaluation of the state
        score: f64,
        /// The round the leaf was found in
        depth: usize,
    },
}

impl<Action> MinMaxReturn<Action>
where
    Action: Debug + Clone,
{
    /// Returns the score for this node
    pub fn score(&self) -> f64 {
        match self {
            MinMaxReturn::Node { score, .. } => *score,
            MinMaxReturn::Leaf { score, .. } => *score,
        }
    }

    /// The action chosen at this node
    ///
    /// Leaves and expectation layers return `None`, the "no-op" of the search.
    pub fn chosen_action(&self) -> Option<&Action> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                options, chosen, ..
            } => chosen.and_then(|i| options.get(i)).map(|(action, _)| action),
        }
    }

    /// The child we would follow from this node, if there is one
    pub fn chosen_child(&self) -> Option<&Self> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                options, chosen, ..
            } => chosen.and_then(|i| options.get(i)).map(|(_, child)| child),
        }
    }

    /// Returns all the actions in the 'route' through the game tree that the search took
    /// This is useful for debugging as it shows each of the moves we and our opponents made during
    /// the simulation
    ///
    /// The route ends early at an expectation layer, since those don't pick an action.
    pub fn chosen_route(&self) -> Vec<(AgentIndex, Action)> {
        let mut route = vec![];
        let mut current = self;

        while let MinMaxReturn::Node {
            agent,
            options,
            chosen: Some(chosen),
            ..
        } = current
        {
            let Some((action, child)) = options.get(*chosen) else {
                break;
            };
            route.push((*agent, action.clone()));
            current = child;
        }

        route
    }

    /// The same node with everything below it dropped, keeping its own score
    pub(crate) fn summarized(self) -> Self {
        match self {
            MinMaxReturn::Node {
                layer,
                agent,
                depth,
                score,
                alpha_beta_cutoff,
                ..
            } => MinMaxReturn::Node {
                layer,
                agent,
                depth,
                options: vec![],
                chosen: None,
                score,
                alpha_beta_cutoff,
            },
            leaf @ MinMaxReturn::Leaf { .. } => leaf,
        }
    }

    /// How many leaves were scored, which is exactly how many times the evaluation function was
    /// called to produce this result
    pub fn leaf_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => {
                options.iter().map(|(_, child)| child.leaf_count()).sum()
            }
        }
    }

    /// Total number of nodes, leaves included
    pub fn node_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => {
                1 + options
                    .iter()
                    .map(|(_, child)| child.node_count())
                    .sum::<usize>()
            }
        }
    }

    /// The deepest round any node in this tree was visited at
    pub fn max_depth(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { depth, .. } => *depth,
            MinMaxReturn::Node { depth, options, .. } => options
                .iter()
                .map(|(_, child)| child.max_depth())
                .fold(*depth, usize::max),
        }
    }

    /// Whether any node in this tree cut off its siblings
    pub fn any_cutoff(&self) -> bool {
        match self {
            MinMaxReturn::Leaf { .. } => false,
            MinMaxReturn::Node {
                alpha_beta_cutoff,
                options,
                ..
            } => *alpha_beta_cutoff || options.iter().any(|(_, child)| child.any_cutoff()),
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the score, the moving agent and the action at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            MinMaxReturn::Leaf { score, .. } => StringTreeNode::new(format!("{label} {score}")),
            MinMaxReturn::Node {
                agent,
                options,
                score,
                chosen,
                alpha_beta_cutoff,
                ..
            } => {
                let cutoff = if *alpha_beta_cutoff { " (cutoff)" } else { "" };
                let mut node = StringTreeNode::new(format!("{label} {score}{cutoff}"));
                for (i, (action, result)) in options.iter().enumerate() {
                    let marker = if *chosen == Some(i) { "*" } else { "" };
                    node.push_node(
                        result.to_text_tree_node(format!("{marker}{action:?} agent {agent}")),
                    );
                }

                node
            }
        }
    }
}
