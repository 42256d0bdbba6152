//! Per-Combatant Spell History
//!
//! Tracks active ability cooldowns for one combatant (or pet) and holds
//! the single-slot cooldown snapshot used by the duel reset.

use bevy::prelude::*;
use std::collections::HashMap;

use super::abilities::{AbilityConfig, AbilityType};

/// One active cooldown in a combatant's spell history.
#[derive(Clone, Debug, PartialEq)]
pub struct CooldownEntry {
    /// Remaining individual recovery time in seconds
    pub recovery_remaining: f32,
    /// Remaining shared-category recovery time in seconds
    pub category_recovery_remaining: f32,
    /// Recovery frozen pending an external condition (e.g. lost
    /// connectivity). On-hold entries never tick and the duel reset
    /// must leave them alone.
    pub on_hold: bool,
}

/// Cooldown storage for a single combatant or pet.
#[derive(Component, Clone, Default)]
pub struct SpellHistory {
    cooldowns: HashMap<AbilityType, CooldownEntry>,
    /// Cooldown set captured when a duel starts. Single slot: saving
    /// again overwrites an abandoned snapshot from an interrupted duel.
    duel_snapshot: Option<HashMap<AbilityType, CooldownEntry>>,
}

impl SpellHistory {
    /// Start the cooldown for an ability from its metadata.
    /// Abilities without any recovery time never get an entry.
    pub fn start_cooldown(&mut self, ability: AbilityType, config: &AbilityConfig) {
        if !config.has_cooldown() {
            return;
        }
        self.cooldowns.insert(
            ability,
            CooldownEntry {
                recovery_remaining: config.cooldown,
                category_recovery_remaining: config.category_cooldown,
                on_hold: false,
            },
        );
    }

    /// Insert a cooldown entry directly. Used by scripted scenarios and
    /// tests to set up precise pre-duel state.
    pub fn insert(&mut self, ability: AbilityType, entry: CooldownEntry) {
        self.cooldowns.insert(ability, entry);
    }

    /// Whether the ability is ready to use (no active recovery).
    pub fn is_ready(&self, ability: &AbilityType) -> bool {
        !self.cooldowns.contains_key(ability)
    }

    /// Get the active cooldown entry for an ability, if any.
    pub fn get(&self, ability: &AbilityType) -> Option<&CooldownEntry> {
        self.cooldowns.get(ability)
    }

    /// Number of active cooldown entries.
    pub fn len(&self) -> usize {
        self.cooldowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cooldowns.is_empty()
    }

    /// Iterate over active cooldowns.
    pub fn iter(&self) -> impl Iterator<Item = (&AbilityType, &CooldownEntry)> {
        self.cooldowns.iter()
    }

    /// Freeze or unfreeze an ability's recovery.
    pub fn set_on_hold(&mut self, ability: &AbilityType, on_hold: bool) {
        if let Some(entry) = self.cooldowns.get_mut(ability) {
            entry.on_hold = on_hold;
        }
    }

    /// Advance all non-held cooldowns by `dt` seconds and drop entries
    /// whose recovery has fully elapsed.
    pub fn tick(&mut self, dt: f32) {
        self.cooldowns.retain(|_, entry| {
            if entry.on_hold {
                return true;
            }
            entry.recovery_remaining = (entry.recovery_remaining - dt).max(0.0);
            entry.category_recovery_remaining =
                (entry.category_recovery_remaining - dt).max(0.0);
            entry.recovery_remaining > 0.0 || entry.category_recovery_remaining > 0.0
        });
    }

    /// Cancel every cooldown matching `predicate`.
    ///
    /// When `affects_category_recovery` is true, matching entries are
    /// removed outright (both recovery components cleared). When false,
    /// only the individual recovery is zeroed and the entry survives
    /// while its category recovery is still running.
    pub fn reset_cooldowns(
        &mut self,
        mut predicate: impl FnMut(&AbilityType, &CooldownEntry) -> bool,
        affects_category_recovery: bool,
    ) {
        if affects_category_recovery {
            self.cooldowns.retain(|ability, entry| !predicate(ability, entry));
        } else {
            self.cooldowns.retain(|ability, entry| {
                if predicate(ability, entry) {
                    entry.recovery_remaining = 0.0;
                    entry.category_recovery_remaining > 0.0
                } else {
                    true
                }
            });
        }
    }

    /// Cancel every cooldown unconditionally (pet variant of the duel
    /// reset: pets do not get the long-cooldown filter).
    pub fn reset_all_cooldowns(&mut self) {
        self.cooldowns.clear();
    }

    /// Capture the full cooldown set into the duel snapshot slot,
    /// overwriting any previous snapshot.
    pub fn save_cooldown_state_before_duel(&mut self) {
        self.duel_snapshot = Some(self.cooldowns.clone());
    }

    /// Reinstate the snapshot captured at duel start and clear the slot.
    /// No-op when no snapshot is pending.
    ///
    /// Only snapshot entries accepted by `keep` come back, and a live
    /// entry always wins over its saved copy: cooldowns that kept
    /// ticking through the duel are not rewound to their saved values.
    pub fn restore_cooldown_state_after_duel(
        &mut self,
        mut keep: impl FnMut(&AbilityType, &CooldownEntry) -> bool,
    ) {
        if let Some(snapshot) = self.duel_snapshot.take() {
            for (ability, entry) in snapshot {
                if keep(&ability, &entry) {
                    self.cooldowns.entry(ability).or_insert(entry);
                }
            }
        }
    }

    /// Whether a duel snapshot is currently pending restoration.
    pub fn has_duel_snapshot(&self) -> bool {
        self.duel_snapshot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(recovery: f32, category: f32, on_hold: bool) -> CooldownEntry {
        CooldownEntry {
            recovery_remaining: recovery,
            category_recovery_remaining: category,
            on_hold,
        }
    }

    #[test]
    fn test_start_cooldown_skips_no_cooldown_abilities() {
        let mut history = SpellHistory::default();
        let config = AbilityConfig {
            name: "Frostbolt".to_string(),
            cooldown: 0.0,
            category_cooldown: 0.0,
        };
        history.start_cooldown(AbilityType::Frostbolt, &config);
        assert!(history.is_ready(&AbilityType::Frostbolt));
    }

    #[test]
    fn test_tick_drops_elapsed_entries() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(3.0, 0.0, false));
        history.insert(AbilityType::Vanish, entry(300.0, 0.0, false));

        history.tick(5.0);

        assert!(history.is_ready(&AbilityType::MindBlast));
        let vanish = history.get(&AbilityType::Vanish).unwrap();
        assert_eq!(vanish.recovery_remaining, 295.0);
    }

    #[test]
    fn test_tick_skips_on_hold_entries() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(3.0, 0.0, true));

        history.tick(10.0);

        let blast = history.get(&AbilityType::MindBlast).unwrap();
        assert_eq!(blast.recovery_remaining, 3.0);
        assert!(blast.on_hold);
    }

    #[test]
    fn test_reset_cooldowns_removes_matching_entries() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(5.0, 0.0, false));
        history.insert(AbilityType::Vanish, entry(250.0, 0.0, false));

        history.reset_cooldowns(|_, e| e.recovery_remaining < 100.0, true);

        assert!(history.is_ready(&AbilityType::MindBlast));
        assert!(!history.is_ready(&AbilityType::Vanish));
    }

    #[test]
    fn test_reset_cooldowns_can_spare_category_recovery() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::FireBlast, entry(6.0, 8.0, false));

        history.reset_cooldowns(|_, _| true, false);

        let blast = history.get(&AbilityType::FireBlast).unwrap();
        assert_eq!(blast.recovery_remaining, 0.0);
        assert_eq!(blast.category_recovery_remaining, 8.0);
    }

    #[test]
    fn test_reset_all_cooldowns() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::SpellLock, entry(25.0, 0.0, false));
        history.insert(AbilityType::DevourMagic, entry(6.0, 0.0, true));

        history.reset_all_cooldowns();

        assert!(history.is_empty());
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(5.0, 0.0, false));

        history.save_cooldown_state_before_duel();
        history.reset_all_cooldowns();
        history.restore_cooldown_state_after_duel(|_, _| true);

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(&AbilityType::MindBlast), Some(&entry(5.0, 0.0, false)));
        assert!(!history.has_duel_snapshot(), "slot should be consumed");
    }

    #[test]
    fn test_restore_skips_entries_rejected_by_keep() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(4.0, 0.0, false));
        history.insert(AbilityType::Vanish, entry(250.0, 0.0, false));
        history.save_cooldown_state_before_duel();
        history.reset_all_cooldowns();

        history.restore_cooldown_state_after_duel(|_, e| e.recovery_remaining >= 100.0);

        assert!(history.is_ready(&AbilityType::MindBlast));
        assert!(!history.is_ready(&AbilityType::Vanish));
    }

    #[test]
    fn test_restore_keeps_live_entries_over_saved_copies() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::Vanish, entry(250.0, 0.0, false));
        history.save_cooldown_state_before_duel();

        // Vanish keeps ticking and a new cooldown appears after the save;
        // neither is rewound or dropped by the restore.
        history.tick(10.0);
        history.insert(AbilityType::PsychicScream, entry(28.0, 0.0, false));
        history.restore_cooldown_state_after_duel(|_, _| true);

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get(&AbilityType::Vanish).unwrap().recovery_remaining,
            240.0
        );
        assert!(!history.is_ready(&AbilityType::PsychicScream));
    }

    #[test]
    fn test_restore_without_snapshot_is_noop() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(5.0, 0.0, false));

        history.restore_cooldown_state_after_duel(|_, _| true);

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_second_save_overwrites_abandoned_snapshot() {
        let mut history = SpellHistory::default();
        history.insert(AbilityType::MindBlast, entry(5.0, 0.0, false));
        history.save_cooldown_state_before_duel();

        // First duel interrupted: snapshot abandoned, state moved on.
        history.reset_all_cooldowns();
        history.insert(AbilityType::PsychicScream, entry(28.0, 0.0, false));
        history.save_cooldown_state_before_duel();
        history.reset_all_cooldowns();
        history.restore_cooldown_state_after_duel(|_, _| true);

        assert!(history.is_ready(&AbilityType::MindBlast));
        assert!(!history.is_ready(&AbilityType::PsychicScream));
    }
}
