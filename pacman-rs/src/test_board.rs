//! A tiny Pacman board for exercising the agents
//!
//! Layouts are drawn the usual way: `%` is a wall, `.` food, `o` a capsule, `P` Pacman and `G` a
//! ghost. The first row drawn is the northmost one. Leading whitespace on each row is ignored so
//! layouts can be indented in tests.
//!
//! The rules are a small subset of the arcade game: every Pacman turn costs a point, food is worth
//! 10, clearing the board is worth 500, a capsule scares every ghost, eating a scared ghost is
//! worth 200 and sends it home, and touching a dangerous ghost loses 500 and the game.

use std::{collections::HashSet, sync::Arc};

use pacman_minimax::types::{
    AgentCountableGame, AgentIndex, ScoreGettableGame, SimulableGame, VictorDeterminableGame,
    PROTAGONIST,
};

use crate::types::{
    CapsuleGettableGame, Direction, FoodGettableGame, GhostGettableGame, GhostState,
    PacmanPositionGettableGame, Position,
};

const TIME_PENALTY: f64 = 1.0;
const FOOD_SCORE: f64 = 10.0;
const WIN_SCORE: f64 = 500.0;
const GHOST_SCORE: f64 = 200.0;
const LOSE_PENALTY: f64 = 500.0;
const SCARED_TIME: u32 = 40;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestBoard {
    walls: Arc<HashSet<Position>>,
    pacman: Position,
    food: Vec<Position>,
    capsules: Vec<Position>,
    ghosts: Vec<GhostState>,
    ghost_starts: Vec<Position>,
    score: f64,
    lost: bool,
    pacman_stuck: bool,
}

impl TestBoard {
    pub(crate) fn parse(layout: &str) -> Self {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let height = rows.len() as i32;

        let mut board = TestBoard {
            walls: Default::default(),
            pacman: Position::new(0, 0),
            food: vec![],
            capsules: vec![],
            ghosts: vec![],
            ghost_starts: vec![],
            score: 0.0,
            lost: false,
            pacman_stuck: false,
        };
        let mut walls = HashSet::new();

        for (row_index, row) in rows.iter().enumerate() {
            let y = height - 1 - row_index as i32;

            for (x, cell) in row.chars().enumerate() {
                let position = Position::new(x as i32, y);

                match cell {
                    '%' => {
                        walls.insert(position);
                    }
                    '.' => board.food.push(position),
                    'o' => board.capsules.push(position),
                    'P' => board.pacman = position,
                    'G' => {
                        board.ghosts.push(GhostState {
                            position,
                            scared_timer: 0,
                        });
                        board.ghost_starts.push(position);
                    }
                    ' ' => {}
                    other => panic!("Unknown layout cell {other:?}"),
                }
            }
        }

        board.walls = Arc::new(walls);
        board
    }

    pub(crate) fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub(crate) fn with_scared_timer(mut self, ghost: usize, scared_timer: u32) -> Self {
        self.ghosts[ghost].scared_timer = scared_timer;
        self
    }

    /// Pacman has no legal moves at all, not even stopping, while the game goes on
    pub(crate) fn with_pacman_stuck(mut self) -> Self {
        self.pacman_stuck = true;
        self
    }

    fn open_moves(&self, from: Position) -> Vec<Direction> {
        Direction::all_moves()
            .into_iter()
            .filter(|direction| !self.walls.contains(&from.step(*direction)))
            .collect()
    }

    fn resolve_collisions(&mut self) {
        for (ghost, start) in self.ghosts.iter_mut().zip(&self.ghost_starts) {
            if ghost.position != self.pacman {
                continue;
            }

            if ghost.is_scared() {
                self.score += GHOST_SCORE;
                ghost.position = *start;
                ghost.scared_timer = 0;
            } else {
                self.score -= LOSE_PENALTY;
                self.lost = true;
            }
        }
    }
}

impl AgentCountableGame for TestBoard {
    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }
}

impl SimulableGame for TestBoard {
    type Action = Direction;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action> {
        if self.is_over() {
            return vec![];
        }

        if agent == PROTAGONIST {
            if self.pacman_stuck {
                return vec![];
            }

            let mut moves = self.open_moves(self.pacman);
            moves.push(Direction::Stop);
            return moves;
        }

        let moves = self.open_moves(self.ghosts[agent - 1].position);
        if moves.is_empty() {
            vec![Direction::Stop]
        } else {
            moves
        }
    }

    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self {
        let mut next = self.clone();

        if agent == PROTAGONIST {
            let target = next.pacman.step(*action);
            if !next.walls.contains(&target) {
                next.pacman = target;
            }
            next.score -= TIME_PENALTY;

            if let Some(eaten) = next.food.iter().position(|food| *food == next.pacman) {
                next.food.remove(eaten);
                next.score += FOOD_SCORE;

                if next.food.is_empty() {
                    next.score += WIN_SCORE;
                }
            }

            if let Some(eaten) = next.capsules.iter().position(|c| *c == next.pacman) {
                next.capsules.remove(eaten);
                for ghost in next.ghosts.iter_mut() {
                    ghost.scared_timer = SCARED_TIME;
                }
            }
        } else {
            let ghost = &mut next.ghosts[agent - 1];
            let target = ghost.position.step(*action);
            if !next.walls.contains(&target) {
                ghost.position = target;
            }
            ghost.scared_timer = ghost.scared_timer.saturating_sub(1);
        }

        next.resolve_collisions();
        next
    }
}

impl VictorDeterminableGame for TestBoard {
    fn is_win(&self) -> bool {
        !self.lost && self.food.is_empty()
    }

    fn is_lose(&self) -> bool {
        self.lost
    }
}

impl ScoreGettableGame for TestBoard {
    fn score(&self) -> f64 {
        self.score
    }
}

impl PacmanPositionGettableGame for TestBoard {
    fn pacman_position(&self) -> Position {
        self.pacman
    }
}

impl FoodGettableGame for TestBoard {
    fn food(&self) -> Vec<Position> {
        self.food.clone()
    }
}

impl CapsuleGettableGame for TestBoard {
    fn capsules(&self) -> Vec<Position> {
        self.capsules.clone()
    }
}

impl GhostGettableGame for TestBoard {
    fn ghost_states(&self) -> Vec<GhostState> {
        self.ghosts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let board = TestBoard::parse(
            "%%%%%%
             %P.oG%
             %%%%%%",
        );

        assert_eq!(board.pacman_position(), Position::new(1, 1));
        assert_eq!(board.food(), vec![Position::new(2, 1)]);
        assert_eq!(board.capsules(), vec![Position::new(3, 1)]);
        assert_eq!(board.num_agents(), 2);
        assert_eq!(
            board.legal_actions(PROTAGONIST),
            vec![Direction::East, Direction::Stop]
        );
        assert_eq!(board.legal_actions(1), vec![Direction::West]);
    }

    #[test]
    fn test_eating_the_last_food_wins() {
        let board = TestBoard::parse(
            "%%%%
             %P.%
             %%%%",
        );

        let after = board.successor(PROTAGONIST, &Direction::East);

        assert!(after.is_win());
        assert_eq!(after.score(), -1.0 + 10.0 + 500.0);
        assert!(!board.is_win());
    }

    #[test]
    fn test_capsule_scares_ghosts_and_they_can_be_eaten() {
        let board = TestBoard::parse(
            "%%%%%%
             %Po G%
             %....%
             %%%%%%",
        );

        let scared = board.successor(PROTAGONIST, &Direction::East);
        assert!(scared.ghost_states()[0].is_scared());

        let closer = scared.successor(1, &Direction::West);
        assert_eq!(closer.ghost_states()[0].scared_timer, SCARED_TIME - 1);

        let eaten = closer.successor(PROTAGONIST, &Direction::East);
        assert!(!eaten.is_lose());
        assert_eq!(eaten.ghost_states()[0].position, Position::new(4, 2));
        assert_eq!(eaten.score(), -2.0 + 200.0);
    }

    #[test]
    fn test_touching_a_ghost_loses() {
        let board = TestBoard::parse(
            "%%%%%
             %PG.%
             %%%%%",
        );

        let after = board.successor(PROTAGONIST, &Direction::East);

        assert!(after.is_lose());
        assert!(!after.is_win());
        assert!(after.legal_actions(PROTAGONIST).is_empty());
    }
}
