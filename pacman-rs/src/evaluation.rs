//! Heuristics that turn a Pacman state into a single `f64`, higher being better for Pacman
//!
//! [score_evaluation] and [better_evaluation] score a state and are used at the leaves of the
//! tree search. [reflex_evaluation] scores a state *and* a proposed action, and is only used by
//! the one ply [crate::reflex_agent::ReflexAgent].
//!
//! Every distance is a Manhattan distance on the grid, and every `weight / distance` term adds one
//! to the distance first so standing on a target never divides by zero.

use std::str::FromStr;

use pacman_minimax::{
    types::{ScoreGettableGame, SimulableGame, PROTAGONIST},
    Scorable,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    types::{
        CapsuleGettableGame, Direction, FoodGettableGame, GhostGettableGame, GhostState,
        PacmanPositionGettableGame, Position,
    },
};

mod reflex_weights {
    pub const FOOD: f64 = 10.0;
    pub const SCARED_GHOST: f64 = 200.0;
    pub const GHOST_DANGER: f64 = 1000.0;
    pub const DANGER_RADIUS: u32 = 2;
}

mod better_weights {
    pub const FOOD: f64 = 10.0;
    pub const CAPSULE: f64 = 50.0;
    pub const SCARED_GHOST: f64 = 300.0;
    pub const GHOST_DANGER: f64 = 2000.0;
    pub const DANGER_RADIUS: u32 = 3;
    pub const ENDGAME_FOOD: usize = 5;
    pub const ENDGAME_TARGET: usize = 10;
    pub const ENDGAME_PER_PELLET: f64 = 50.0;
}

fn nearest_distance(from: &Position, targets: impl IntoIterator<Item = Position>) -> Option<u32> {
    targets
        .into_iter()
        .map(|target| from.manhattan_distance(&target))
        .min()
}

fn closeness(weight: f64, distance: u32) -> f64 {
    weight / (distance as f64 + 1.0)
}

/// Distance to the nearest scared ghost and to the nearest dangerous one
fn ghost_distances(from: &Position, ghosts: &[GhostState]) -> (Option<u32>, Option<u32>) {
    let (scared, threatening): (Vec<&GhostState>, Vec<&GhostState>) = ghosts.iter().partition(|g| g.is_scared());

    (
        nearest_distance(from, scared.into_iter().map(|g| g.position)),
        nearest_distance(from, threatening.into_iter().map(|g| g.position)),
    )
}

/// The state's own score. This is the default leaf heuristic
pub fn score_evaluation<G: ScoreGettableGame>(game: &G) -> f64 {
    game.score()
}

/// Scores the state Pacman would be in after taking `action` from `game`
///
/// Starting from the successor's score this rewards being close to food and to scared ghosts, and
/// penalizes being within two steps of a dangerous ghost.
pub fn reflex_evaluation<G>(game: &G, action: &Direction) -> f64
where
    G: SimulableGame<Action = Direction>
        + ScoreGettableGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + GhostGettableGame,
{
    let successor = game.successor(PROTAGONIST, action);
    let position = successor.pacman_position();

    let mut score = successor.score();

    if let Some(food) = nearest_distance(&position, successor.food()) {
        score += closeness(reflex_weights::FOOD, food);
    }

    let (scared, threatening) = ghost_distances(&position, &successor.ghost_states());

    if let Some(scared) = scared {
        score += closeness(reflex_weights::SCARED_GHOST, scared);
    }

    if let Some(threatening) = threatening {
        if threatening <= reflex_weights::DANGER_RADIUS {
            score -= closeness(reflex_weights::GHOST_DANGER, threatening);
        }
    }

    score
}

/// A richer leaf heuristic for the tree searches
///
/// On top of the state's score this pulls Pacman towards food, capsules and scared ghosts, pushes
/// it away from dangerous ghosts within three steps, and adds a bonus once five or fewer pellets
/// remain so clearing the board wins out over wandering.
pub fn better_evaluation<G>(game: &G) -> f64
where
    G: ScoreGettableGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + CapsuleGettableGame
        + GhostGettableGame,
{
    let position = game.pacman_position();
    let food = game.food();

    let mut score = game.score();

    if let Some(nearest) = nearest_distance(&position, food.iter().copied()) {
        score += closeness(better_weights::FOOD, nearest);
    }

    if let Some(capsule) = nearest_distance(&position, game.capsules()) {
        score += closeness(better_weights::CAPSULE, capsule);
    }

    let (scared, threatening) = ghost_distances(&position, &game.ghost_states());

    if let Some(scared) = scared {
        score += closeness(better_weights::SCARED_GHOST, scared);
    }

    if let Some(threatening) = threatening {
        if threatening <= better_weights::DANGER_RADIUS {
            score -= closeness(better_weights::GHOST_DANGER, threatening);
        }
    }

    if food.len() <= better_weights::ENDGAME_FOOD {
        let missing = better_weights::ENDGAME_TARGET - food.len();
        score += missing as f64 * better_weights::ENDGAME_PER_PELLET;
    }

    score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The leaf heuristics a search agent can be configured with
pub enum EvaluationFunction {
    /// [score_evaluation]
    #[default]
    #[serde(alias = "scoreEvaluationFunction")]
    Score,
    /// [better_evaluation]
    #[serde(alias = "betterEvaluationFunction")]
    Better,
}

impl EvaluationFunction {
    /// Run this heuristic on `game`
    pub fn evaluate<G>(&self, game: &G) -> f64
    where
        G: ScoreGettableGame
            + PacmanPositionGettableGame
            + FoodGettableGame
            + CapsuleGettableGame
            + GhostGettableGame,
    {
        match self {
            EvaluationFunction::Score => score_evaluation(game),
            EvaluationFunction::Better => better_evaluation(game),
        }
    }
}

impl<G> Scorable<G> for EvaluationFunction
where
    G: ScoreGettableGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + CapsuleGettableGame
        + GhostGettableGame,
{
    fn score(&self, game: &G) -> f64 {
        self.evaluate(game)
    }
}

impl FromStr for EvaluationFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(EvaluationFunction::Score),
            "better" | "betterEvaluationFunction" => Ok(EvaluationFunction::Better),
            _ => Err(ConfigError::UnknownEvaluationFunction(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_board::TestBoard;

    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_score_evaluation_is_the_state_score() {
        let board = TestBoard::parse(
            "%%%%%
             %P.G%
             %%%%%",
        )
        .with_score(37.5);

        assert_eq!(score_evaluation(&board), 37.5);
        assert_eq!(EvaluationFunction::Score.evaluate(&board), 37.5);
    }

    #[test]
    fn test_reflex_rewards_moving_towards_food() {
        let board = TestBoard::parse(
            "%%%%%%%
             %P  .%%
             %%%%%%%",
        );

        let closer = reflex_evaluation(&board, &Direction::East);
        let stay = reflex_evaluation(&board, &Direction::Stop);

        // Both lose a point for the turn, then 10 / (2 + 1) against 10 / (3 + 1)
        assert_close(closer, -1.0 + 10.0 / 3.0);
        assert_close(stay, -1.0 + 10.0 / 4.0);
        assert!(closer > stay);
    }

    #[test]
    fn test_reflex_without_food_or_ghosts_is_the_successor_score() {
        let board = TestBoard::parse(
            "%%%%%
             %P  %
             %%%%%",
        )
        .with_score(20.0);

        assert_close(reflex_evaluation(&board, &Direction::East), 19.0);
    }

    #[test]
    fn test_reflex_danger_radius() {
        let board = TestBoard::parse(
            "%%%%%%%%%
             %P    G%%
             %%%%%%%%%",
        );

        // Moving east leaves the ghost 4 steps away, outside the radius
        assert_close(reflex_evaluation(&board, &Direction::East), -1.0);

        let closer = TestBoard::parse(
            "%%%%%%%
             %P  G%%
             %%%%%%%",
        );

        // Moving east puts the ghost 2 steps away
        assert_close(
            reflex_evaluation(&closer, &Direction::East),
            -1.0 - 1000.0 / 3.0,
        );
    }

    #[test]
    fn test_reflex_chases_scared_ghosts() {
        let board = TestBoard::parse(
            "%%%%%%%%
             %P    G%
             %%%%%%%%",
        )
        .with_scared_timer(0, 10);

        let towards = reflex_evaluation(&board, &Direction::East);
        let stay = reflex_evaluation(&board, &Direction::Stop);

        assert_close(towards, -1.0 + 200.0 / 5.0);
        assert_close(stay, -1.0 + 200.0 / 6.0);
        assert!(towards > stay);
    }

    #[test]
    fn test_better_weights() {
        let board = TestBoard::parse(
            "%%%%%%%%%%
             %P o   G%%
             %........%
             %........%
             %%%%%%%%%%",
        );

        assert_eq!(board.food().len(), 16);

        // Food is one step south, the capsule two steps east, and the ghost six steps away
        let expected = 10.0 / 2.0 + 50.0 / 3.0;
        assert_close(better_evaluation(&board), expected);
        assert_close(EvaluationFunction::Better.evaluate(&board), expected);
    }

    #[test]
    fn test_better_penalizes_close_ghosts() {
        let board = TestBoard::parse(
            "%%%%%%%%%%
             %P  G....%
             %........%
             %%%%%%%%%%",
        );

        let expected = 10.0 / 2.0 - 2000.0 / 4.0;
        assert_close(better_evaluation(&board), expected);
    }

    #[test]
    fn test_better_endgame_bonus() {
        let board = TestBoard::parse(
            "%%%%%%
             %P  .%
             %%%%%%",
        );

        // One pellet left is 9 missing pellets worth 50 each
        assert_close(better_evaluation(&board), 10.0 / 4.0 + 9.0 * 50.0);

        let cleared = TestBoard::parse(
            "%%%%%
             %P  %
             %%%%%",
        );

        assert_close(better_evaluation(&cleared), 10.0 * 50.0);
    }

    #[test]
    fn test_better_chases_scared_ghosts() {
        let board = TestBoard::parse(
            "%%%%%%
             %P  G%
             %%%%%%",
        )
        .with_scared_timer(0, 3);

        assert_close(better_evaluation(&board), 300.0 / 4.0 + 500.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("score".parse::<EvaluationFunction>(), Ok(EvaluationFunction::Score));
        assert_eq!(
            "scoreEvaluationFunction".parse::<EvaluationFunction>(),
            Ok(EvaluationFunction::Score)
        );
        assert_eq!("better".parse::<EvaluationFunction>(), Ok(EvaluationFunction::Better));
        assert_eq!(
            "betterEvaluationFunction".parse::<EvaluationFunction>(),
            Ok(EvaluationFunction::Better)
        );
        assert_eq!(
            "best".parse::<EvaluationFunction>(),
            Err(ConfigError::UnknownEvaluationFunction("best".to_owned()))
        );
    }

    #[test]
    fn test_deserialize_aliases() {
        let parsed: Vec<EvaluationFunction> =
            serde_json::from_str(r#"["score", "betterEvaluationFunction"]"#).unwrap();

        assert_eq!(
            parsed,
            vec![EvaluationFunction::Score, EvaluationFunction::Better]
        );
        assert_eq!(EvaluationFunction::default(), EvaluationFunction::Score);
    }
}
