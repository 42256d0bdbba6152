//! DuelSim - Headless Duel State Reset Simulator
//!
//! Runs a scripted duel between two combatants and reports how their
//! cooldowns and vitals were reset and restored around it.

use duelsim::cli;
use duelsim::headless::{run_headless_duel, HeadlessDuelConfig};

fn main() {
    let args = cli::parse_args();

    let mut config = match &args.config {
        Some(path) => match HeadlessDuelConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading duel config: {}", e);
                std::process::exit(1);
            }
        },
        None => HeadlessDuelConfig::default(),
    };

    if let Some(output) = &args.output {
        config.output_path = Some(output.display().to_string());
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }

    match run_headless_duel(config) {
        Ok(report) => {
            println!(
                "Outcome: {:?} (winner: {})",
                report.outcome,
                report
                    .winner
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            for side in [&report.challenger, &report.opponent] {
                println!(
                    "  {}: health {:.0} -> {:.0}, mana {:.0} -> {:.0}, {} cooldowns active",
                    side.class_name,
                    side.pre_duel_health,
                    side.final_health,
                    side.pre_duel_mana,
                    side.final_mana,
                    side.active_cooldowns
                );
            }
        }
        Err(e) => {
            eprintln!("Duel failed: {}", e);
            std::process::exit(1);
        }
    }
}
