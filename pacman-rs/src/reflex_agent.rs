//! The one ply agent
//!
//! It never looks further than its own next move. Each legal direction is scored with
//! [reflex_evaluation] and one of the best scoring directions is picked at random. A finished
//! game has nothing left to choose, so Pacman stops.

use itertools::Itertools;
use pacman_minimax::types::{VictorDeterminableGame, PROTAGONIST};
use rand::{seq::SliceRandom, thread_rng, Rng};
use tracing::debug;

use crate::{
    error::{AgentError, ConfigError},
    evaluation::reflex_evaluation,
    types::{Direction, PacmanGame},
    AgentFactory, AgentOptions, BoxedAgent, PacmanAgent,
};

#[derive(Debug, Clone, Copy, Default)]
/// Picks the direction whose successor scores best right now
pub struct ReflexAgent {}

impl ReflexAgent {
    /// Like [PacmanAgent::choose_action] but breaking ties with the given RNG
    pub fn choose_action_with_rng<G, R>(
        &self,
        game: &G,
        rng: &mut R,
    ) -> Result<Direction, AgentError>
    where
        G: PacmanGame,
        R: Rng + ?Sized,
    {
        if game.is_over() {
            return Ok(Direction::Stop);
        }

        let legal_actions = game.legal_actions(PROTAGONIST);
        // `max` drops NaN, so a NaN score counts as the worst possible one
        let scores = legal_actions
            .iter()
            .map(|action| reflex_evaluation(game, action).max(f64::NEG_INFINITY))
            .collect_vec();

        let best_score = scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let best_indices = scores
            .iter()
            .positions(|score| *score == best_score)
            .collect_vec();

        let chosen = best_indices
            .choose(rng)
            .map(|index| legal_actions[*index])
            .ok_or(AgentError::NoLegalActions)?;

        debug!(
            %chosen,
            best_score,
            ties = best_indices.len(),
            "reflex agent picked a direction"
        );

        Ok(chosen)
    }
}

impl<G: PacmanGame> PacmanAgent<G> for ReflexAgent {
    fn name(&self) -> &str {
        "reflex"
    }

    fn choose_action(&self, game: &G) -> Result<Direction, AgentError> {
        self.choose_action_with_rng(game, &mut thread_rng())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReflexAgentFactory {}

impl<G: PacmanGame> AgentFactory<G> for ReflexAgentFactory {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    /// The reflex agent doesn't search, so the options are ignored
    fn build(&self, _options: AgentOptions) -> Result<BoxedAgent<G>, ConfigError> {
        Ok(Box::new(ReflexAgent {}))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pacman_minimax::types::SimulableGame;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::test_board::TestBoard;

    use super::*;

    #[test]
    fn test_moves_towards_food() {
        let board = TestBoard::parse(
            "%%%%%%%
             %P  .%%
             %%%%%%%",
        );

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            ReflexAgent {}.choose_action_with_rng(&board, &mut rng),
            Ok(Direction::East)
        );
    }

    #[test]
    fn test_avoids_dangerous_ghost() {
        let board = TestBoard::parse(
            "%%%%%%%%
             %.  P G%
             %%%%%%%%",
        );

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            ReflexAgent {}.choose_action_with_rng(&board, &mut rng),
            Ok(Direction::West)
        );
    }

    #[test]
    fn test_ties_are_broken_randomly() {
        let board = TestBoard::parse(
            "%%%%%
             %.P.%
             %%%%%",
        );

        let picks: HashSet<Direction> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                ReflexAgent {}
                    .choose_action_with_rng(&board, &mut rng)
                    .unwrap()
            })
            .collect();

        assert_eq!(picks, HashSet::from([Direction::East, Direction::West]));
    }

    #[test]
    fn test_same_seed_same_pick() {
        let board = TestBoard::parse(
            "%%%%%
             %.P.%
             %%%%%",
        );

        let first = ReflexAgent {}.choose_action_with_rng(&board, &mut StdRng::seed_from_u64(9));
        let second = ReflexAgent {}.choose_action_with_rng(&board, &mut StdRng::seed_from_u64(9));

        assert_eq!(first, second);
    }

    #[test]
    fn test_finished_game_stops() {
        let board = TestBoard::parse(
            "%%%%%
             %PG.%
             %%%%%",
        );
        let lost = board.successor(PROTAGONIST, &Direction::East);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            ReflexAgent {}.choose_action_with_rng(&lost, &mut rng),
            Ok(Direction::Stop)
        );
    }

    #[test]
    fn test_no_legal_actions() {
        let board = TestBoard::parse(
            "%%%%%
             %P.G%
             %%%%%",
        )
        .with_pacman_stuck();

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            ReflexAgent {}.choose_action_with_rng(&board, &mut rng),
            Err(AgentError::NoLegalActions)
        );
    }

    #[test]
    fn test_nan_scores_still_pick_a_legal_direction() {
        let board = TestBoard::parse(
            "%%%%%
             %.P.%
             %%%%%",
        )
        .with_score(f64::NAN);
        let legal_actions = board.legal_actions(PROTAGONIST);

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = ReflexAgent {}
                .choose_action_with_rng(&board, &mut rng)
                .unwrap();

            assert!(legal_actions.contains(&chosen), "{chosen}");
        }
    }
}
