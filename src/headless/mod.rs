//! Headless mode for agentic testing
//!
//! Runs scripted duels without any graphical output, suitable for
//! automated testing and integration into larger pipelines.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless duel
//! cargo run --release -- --config duel_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "challenger": "Mage",
//!   "opponent": "Druid",
//!   "outcome": "Won",
//!   "winner": 1,
//!   "random_seed": 42
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessDuelConfig;
pub use runner::{run_headless_duel, CombatantReport, DuelReport};
