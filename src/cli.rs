//! Command-line interface for DuelSim
//!
//! The binary always runs headless; the CLI selects the duel script.

use clap::Parser;
use std::path::PathBuf;

/// Headless duel state reset simulator
#[derive(Parser, Debug)]
#[command(name = "duelsim")]
#[command(about = "Headless duel state reset simulator")]
#[command(version)]
pub struct Args {
    /// JSON duel config file (defaults to a built-in Mage vs Druid duel)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Output path for the duel log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Random seed for deterministic duels
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
