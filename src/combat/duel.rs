//! Duel State Reset
//!
//! Neutralizes both duelists' transient combat state when a duel starts
//! and restores it when the duel ends:
//! - At duel start, cooldowns and vitals are snapshotted and reset so the
//!   duel is fought from a fair baseline.
//! - At duel end, the snapshots are restored, but only when the duel was
//!   actually won. Interrupted or fled duels leave state as the fight
//!   left it and abandon the snapshots.
//!
//! Both behaviors are gated by independent `DuelSettings` flags.

use bevy::prelude::*;

use crate::settings::DuelSettings;

use super::abilities::{AbilityConfig, AbilityDefinitions};
use super::components::{Combatant, Pet};
use super::log::{CombatLog, CombatLogEventType};
use super::spell_history::{CooldownEntry, SpellHistory};

/// Cooldowns at or above this recovery time survive a duel (10 minutes).
pub const DUEL_COOLDOWN_THRESHOLD_SECS: f32 = 600.0;

/// How a duel concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DuelOutcome {
    /// Decisive result. The only outcome that restores pre-duel state.
    Won,
    /// Duel was cancelled mid-fight (e.g. outside interference)
    Interrupted,
    /// A duelist ran out of the duel area
    Fled,
}

/// Event fired by the duel orchestrator when a duel begins.
/// The two entities are guaranteed distinct live combatants.
#[derive(Event)]
pub struct DuelStartEvent {
    pub challenger: Entity,
    pub opponent: Entity,
}

/// Event fired by the duel orchestrator when a duel concludes.
/// Always paired with a prior `DuelStartEvent` for the same pair.
#[derive(Event)]
pub struct DuelEndEvent {
    pub winner: Entity,
    pub loser: Entity,
    pub outcome: DuelOutcome,
}

/// Whether the duel reset cancels this cooldown entry.
///
/// Short, non-held cooldowns are cleared; long-cooldown investment
/// (individual or shared-category recovery of 10 minutes or more) and
/// on-hold entries are left untouched.
pub fn clears_for_duel(config: &AbilityConfig, entry: &CooldownEntry) -> bool {
    config.cooldown < DUEL_COOLDOWN_THRESHOLD_SECS
        && config.category_cooldown < DUEL_COOLDOWN_THRESHOLD_SECS
        && !entry.on_hold
}

/// Cancel all short, non-held cooldowns on a combatant, and optionally
/// wipe its active pet's cooldowns entirely (pets skip the 10 minute
/// filter).
///
/// Metadata lookup panics for cooldown entries with no definition: that
/// is an upstream contract violation, not a runtime error.
fn reset_spell_cooldowns(
    abilities: &AbilityDefinitions,
    combatant: &Combatant,
    history: &mut SpellHistory,
    pets: &mut Query<&mut SpellHistory, With<Pet>>,
    remove_active_pet_cooldowns: bool,
) {
    history.reset_cooldowns(
        |ability, entry| clears_for_duel(abilities.get_unchecked(ability), entry),
        true,
    );

    // Pet cooldowns
    if remove_active_pet_cooldowns {
        if let Some(pet) = combatant.pet {
            if let Ok(mut pet_history) = pets.get_mut(pet) {
                pet_history.reset_all_cooldowns();
            }
        }
    }
}

/// Handle `DuelStartEvent`: snapshot then reset cooldowns and vitals for
/// both duelists, each category gated by its own settings flag.
///
/// Ordering matters: state is always saved before it is reset.
pub fn handle_duel_start(
    settings: Res<DuelSettings>,
    abilities: Res<AbilityDefinitions>,
    mut events: EventReader<DuelStartEvent>,
    mut combat_log: ResMut<CombatLog>,
    mut duelists: Query<(&mut Combatant, &mut SpellHistory), Without<Pet>>,
    mut pets: Query<&mut SpellHistory, With<Pet>>,
) {
    for event in events.read() {
        // Cooldowns reset
        if settings.reset_duel_cooldowns {
            for entity in [event.challenger, event.opponent] {
                let Ok((combatant, mut history)) = duelists.get_mut(entity) else {
                    warn!("Duel start for missing combatant {:?}", entity);
                    continue;
                };
                history.save_cooldown_state_before_duel();
                reset_spell_cooldowns(&abilities, &combatant, &mut history, &mut pets, true);
                combat_log.log(
                    CombatLogEventType::Cooldowns,
                    format!("{}: cooldowns saved and reset for duel", combatant.label()),
                );
            }
        }

        // Health and mana reset
        if settings.reset_duel_health_mana {
            for entity in [event.challenger, event.opponent] {
                let Ok((mut combatant, _)) = duelists.get_mut(entity) else {
                    continue;
                };
                combatant.save_health_before_duel();
                combatant.current_health = combatant.max_health;

                // Druids count as mana users regardless of declared pool
                if combatant.uses_mana() {
                    combatant.save_mana_before_duel();
                    combatant.current_mana = combatant.max_mana;
                }
                combat_log.log(
                    CombatLogEventType::Vitals,
                    format!("{}: vitals saved and reset for duel", combatant.label()),
                );
            }
        }

        combat_log.log(CombatLogEventType::DuelEvent, "Duel started!".to_string());
        info!("Duel started between {:?} and {:?}", event.challenger, event.opponent);
    }
}

/// Handle `DuelEndEvent`: restore pre-duel state for both duelists.
///
/// Only a `Won` outcome restores anything. Cooldowns are reset again
/// before the snapshot is reapplied so that abilities used inside the
/// duel do not stay on cooldown afterwards, and the restore only
/// reinstates snapshot entries the reset would have spared: short
/// non-held cooldowns captured pre-duel stay cleared rather than coming
/// back at their saved remaining time. Vitals need no such pass.
pub fn handle_duel_end(
    settings: Res<DuelSettings>,
    abilities: Res<AbilityDefinitions>,
    mut events: EventReader<DuelEndEvent>,
    mut combat_log: ResMut<CombatLog>,
    mut duelists: Query<(&mut Combatant, &mut SpellHistory), Without<Pet>>,
    mut pets: Query<&mut SpellHistory, With<Pet>>,
) {
    for event in events.read() {
        // Interrupted and fled duels leave state exactly as the fight
        // left it; the snapshots stay abandoned in their slots.
        if event.outcome != DuelOutcome::Won {
            combat_log.log(
                CombatLogEventType::DuelEvent,
                format!("Duel ended ({:?}) - no state restored", event.outcome),
            );
            info!("Duel ended ({:?}), skipping restoration", event.outcome);
            continue;
        }

        // Cooldown restore: reset first, then reapply the snapshot
        if settings.reset_duel_cooldowns {
            for entity in [event.winner, event.loser] {
                let Ok((combatant, mut history)) = duelists.get_mut(entity) else {
                    warn!("Duel end for missing combatant {:?}", entity);
                    continue;
                };
                reset_spell_cooldowns(&abilities, &combatant, &mut history, &mut pets, true);
            }
            for entity in [event.winner, event.loser] {
                let Ok((combatant, mut history)) = duelists.get_mut(entity) else {
                    continue;
                };
                history.restore_cooldown_state_after_duel(|ability, entry| {
                    !clears_for_duel(abilities.get_unchecked(ability), entry)
                });
                combat_log.log(
                    CombatLogEventType::Cooldowns,
                    format!("{}: cooldowns restored after duel", combatant.label()),
                );
            }
        }

        // Health and mana restore
        if settings.reset_duel_health_mana {
            for entity in [event.winner, event.loser] {
                let Ok((mut combatant, _)) = duelists.get_mut(entity) else {
                    continue;
                };
                combatant.restore_health_after_duel();
                if combatant.uses_mana() {
                    combatant.restore_mana_after_duel();
                }
                combat_log.log(
                    CombatLogEventType::Vitals,
                    format!("{}: vitals restored after duel", combatant.label()),
                );
            }
        }

        combat_log.log(CombatLogEventType::DuelEvent, "Duel won!".to_string());
        info!("Duel won by {:?}, pre-duel state restored", event.winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cooldown: f32, category_cooldown: f32) -> AbilityConfig {
        AbilityConfig {
            name: "Test".to_string(),
            cooldown,
            category_cooldown,
        }
    }

    fn entry(on_hold: bool) -> CooldownEntry {
        CooldownEntry {
            recovery_remaining: 5.0,
            category_recovery_remaining: 0.0,
            on_hold,
        }
    }

    #[test]
    fn test_short_cooldown_clears() {
        assert!(clears_for_duel(&config(8.0, 0.0), &entry(false)));
    }

    #[test]
    fn test_long_cooldown_survives() {
        assert!(!clears_for_duel(&config(900.0, 0.0), &entry(false)));
    }

    #[test]
    fn test_long_category_cooldown_survives() {
        assert!(!clears_for_duel(&config(8.0, 1200.0), &entry(false)));
    }

    #[test]
    fn test_on_hold_survives() {
        assert!(!clears_for_duel(&config(8.0, 0.0), &entry(true)));
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly 10 minutes is not "under 10 minutes"
        assert!(!clears_for_duel(&config(600.0, 0.0), &entry(false)));
        assert!(clears_for_duel(&config(599.9, 0.0), &entry(false)));
    }
}
