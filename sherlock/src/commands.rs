pub mod compare;
pub mod solve;

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use pacman_minimax::TreeGame;

use compare::Compare;
use solve::Solve;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run one search on a game tree and explain its choice
    Solve(Solve),
    /// Run every search on a game tree side by side
    Compare(Compare),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Compare(c) => c.run()?,
        }

        Ok(())
    }
}

pub(crate) fn load_fixture(path: &Path) -> Result<TreeGame> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Couldn't read fixture {}", path.display()))?;

    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("{} is not a valid game tree", path.display()))
}
