//! DuelSim - Headless Duel State Reset Simulator
//!
//! Simulates consensual duels between two combatants with the
//! server-style pre/post duel state handling: cooldowns and vitals are
//! snapshotted and reset when a duel starts, and restored when the duel
//! ends decisively.
//!
//! This library exposes the core modules for testing and reuse.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod settings;

// Re-export commonly used types
pub use combat::components::{CharacterClass, Combatant, Pet, ResourceType};
pub use combat::duel::{DuelEndEvent, DuelOutcome, DuelStartEvent};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::DuelPlugin;
pub use headless::HeadlessDuelConfig;
pub use settings::DuelSettings;
