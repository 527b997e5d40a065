use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use itertools::Itertools;
use pacman_minimax::{Algorithm, CountingScore, SearchAgent, SearchOptions, TreeGame};

use super::load_fixture;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Path to a JSON game tree
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// The search to run
    #[clap(short, long, default_value = "minimax")]
    algorithm: Algorithm,

    /// How many full rounds to look ahead
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// Print the whole explored tree
    #[clap(long, action)]
    tree: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_fixture(&self.fixture)?;

        let agent = SearchAgent::new(
            CountingScore::new(|game: &TreeGame| game.node_score()),
            "sherlock",
            SearchOptions {
                algorithm: self.algorithm,
                depth: self.depth,
            },
        )?;

        let result = agent.search(&game)?;

        match result.chosen_action() {
            Some(action) => println!("{} {action}", "Chosen action".green()),
            None => println!("{}", "The root is already over, nothing to choose".yellow()),
        }
        println!("Value {}", result.score());
        println!("Evaluations {}", agent.score_function().count());
        println!("Nodes visited {}", result.node_count());

        let route = result.chosen_route();
        if !route.is_empty() {
            println!(
                "Route {}",
                route
                    .iter()
                    .map(|(agent, action)| format!("{action} (agent {agent})"))
                    .join(" -> ")
            );
        }

        if result.any_cutoff() {
            println!("{}", "Some branches were pruned".dimmed());
        }

        if self.tree {
            println!();
            println!("{}", result.to_text_tree());
        }

        Ok(())
    }
}
