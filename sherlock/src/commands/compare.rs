use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use pacman_minimax::{Algorithm, CountingScore, SearchAgent, SearchOptions, TreeGame};

use super::load_fixture;

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Path to a JSON game tree
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// How many full rounds to look ahead
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_fixture(&self.fixture)?;

        println!(
            "{:<12} {:>12} {:>12} {:>12}",
            "algorithm", "value", "action", "evaluations"
        );

        let mut minimax_choice = None;

        for algorithm in Algorithm::all() {
            let agent = SearchAgent::new(
                CountingScore::new(|game: &TreeGame| game.node_score()),
                algorithm.name(),
                SearchOptions {
                    algorithm,
                    depth: self.depth,
                },
            )?;

            let result = agent.search(&game)?;
            let action = result
                .chosen_action()
                .cloned()
                .unwrap_or_else(|| "-".to_owned());

            println!(
                "{:<12} {:>12} {:>12} {:>12}",
                algorithm.name(),
                result.score(),
                action,
                agent.score_function().count()
            );

            match algorithm {
                Algorithm::Minimax => minimax_choice = Some((result.score(), action)),
                Algorithm::AlphaBeta => {
                    if minimax_choice.as_ref() != Some(&(result.score(), action)) {
                        println!(
                            "{}",
                            "alphabeta disagrees with minimax, the tree probably has ties".red()
                        );
                    }
                }
                Algorithm::Expectimax => {}
            }
        }

        Ok(())
    }
}
