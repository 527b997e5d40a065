use std::sync::atomic::{AtomicUsize, Ordering};

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait to be able to layer in different scoring approaches, such as counting how
/// often the leaf heuristic is called
pub trait Scorable<GameType> {
    /// Convert the given GameType into a score, higher is better for the protagonist
    fn score(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

#[derive(Debug)]
/// Wraps a [Scorable] and counts how many times it was asked for a score
///
/// ```rust
/// use pacman_minimax::{CountingScore, Scorable};
///
/// let counted = CountingScore::new(|n: &i32| *n as f64);
///
/// assert_eq!(counted.score(&4), 4.0);
/// assert_eq!(counted.score(&7), 7.0);
/// assert_eq!(counted.count(), 2);
/// ```
pub struct CountingScore<ScorableType> {
    scorable: ScorableType,
    count: AtomicUsize,
}

impl<ScorableType> CountingScore<ScorableType> {
    /// Wrap the given scorable with a fresh counter
    pub fn new(scorable: ScorableType) -> Self {
        Self {
            scorable,
            count: AtomicUsize::new(0),
        }
    }

    /// Number of evaluations so far
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Set the counter back to zero
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl<GameType, ScorableType> Scorable<GameType> for CountingScore<ScorableType>
where
    ScorableType: Scorable<GameType>,
{
    fn score(&self, game: &GameType) -> f64 {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.scorable.score(game)
    }
}
