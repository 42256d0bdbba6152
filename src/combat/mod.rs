//! Combat system
//!
//! Implements the duel-relevant combat mechanics:
//! - Combatant vitals (HP, Mana) and class/resource classification
//! - Per-combatant cooldown tracking with a duel snapshot slot
//! - Ability recovery metadata loaded from config
//! - Duel start/end state reset and restoration
//! - Combat logging

use bevy::prelude::*;

pub mod abilities;
pub mod components;
pub mod duel;
pub mod log;
pub mod spell_history;

use duel::{handle_duel_end, handle_duel_start, DuelEndEvent, DuelStartEvent};
use spell_history::SpellHistory;

/// Plugin wiring the duel combat systems.
///
/// Expects `AbilityDefinitions` and `DuelSettings` resources to be
/// present (see `AbilityConfigPlugin` and `SettingsPlugin`).
pub struct DuelPlugin;

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        app
            // Duel lifecycle events
            .add_event::<DuelStartEvent>()
            .add_event::<DuelEndEvent>()
            // Resources
            .init_resource::<log::CombatLog>()
            // Systems: cooldowns advance before duel events are handled
            // so a duel sees up-to-date recovery state
            .add_systems(
                Update,
                (
                    advance_sim_time,
                    tick_cooldowns,
                    handle_duel_start,
                    handle_duel_end,
                )
                    .chain(),
            );
    }
}

/// Advance the combat log clock.
fn advance_sim_time(time: Res<Time>, mut combat_log: ResMut<log::CombatLog>) {
    combat_log.sim_time += time.delta_secs();
}

/// Tick every spell history (combatants and pets alike).
fn tick_cooldowns(time: Res<Time>, mut histories: Query<&mut SpellHistory>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for mut history in histories.iter_mut() {
        history.tick(dt);
    }
}
