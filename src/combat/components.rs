//! Combatant Components
//!
//! ECS components and data structures for the duelists themselves:
//! classes, resource pools, vitals and the single-slot pre-duel
//! vitals snapshots.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Character classes available in the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Priest,
    Warlock,
    Druid,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Priest => "Priest",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Druid => "Druid",
        }
    }

    pub fn all() -> [CharacterClass; 6] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Priest,
            CharacterClass::Warlock,
            CharacterClass::Druid,
        ]
    }
}

/// Resource type for combatants (Mana, Energy, Rage).
/// Different classes use different resources with different mechanics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// Mana - Used by Mages, Priests and Warlocks. Regenerates over time.
    Mana,
    /// Energy - Used by Rogues and (feral) Druids. Regenerates rapidly.
    Energy,
    /// Rage - Used by Warriors. Starts at 0, builds from combat.
    Rage,
}

/// Marker component for a combatant's pet (Felhunter, etc.).
/// Pets carry their own `SpellHistory` but no vitals of duel relevance.
#[derive(Component)]
pub struct Pet {
    /// Entity of the owning combatant
    pub owner: Entity,
}

/// Core combatant component containing duel-relevant state.
#[derive(Component, Clone)]
pub struct Combatant {
    /// Team identifier (1 or 2)
    pub team: u8,
    /// Character class
    pub class: CharacterClass,
    /// Resource type the class declares (Mana, Energy, Rage)
    pub resource_type: ResourceType,
    /// Maximum health points
    pub max_health: f32,
    /// Current health points
    pub current_health: f32,
    /// Maximum mana points
    pub max_mana: f32,
    /// Current mana points
    pub current_mana: f32,
    /// Active pet entity, if any
    pub pet: Option<Entity>,
    /// Health captured when a duel starts, restored when it ends in a win.
    /// Single slot: a new save overwrites whatever was left behind.
    pub duel_health_save: Option<f32>,
    /// Mana captured when a duel starts, same single-slot semantics.
    pub duel_mana_save: Option<f32>,
}

impl Combatant {
    /// Create a new combatant with class-specific stats.
    pub fn new(team: u8, class: CharacterClass) -> Self {
        // Class-specific baselines (resource_type, max_health, max_mana)
        let (resource_type, max_health, max_mana) = match class {
            CharacterClass::Warrior => (ResourceType::Rage, 200.0, 100.0),
            CharacterClass::Mage => (ResourceType::Mana, 150.0, 200.0),
            CharacterClass::Rogue => (ResourceType::Energy, 175.0, 100.0),
            CharacterClass::Priest => (ResourceType::Mana, 150.0, 150.0),
            CharacterClass::Warlock => (ResourceType::Mana, 160.0, 180.0),
            // Druids declare an Energy pool here but still carry mana
            CharacterClass::Druid => (ResourceType::Energy, 170.0, 160.0),
        };

        Self {
            team,
            class,
            resource_type,
            max_health,
            current_health: max_health,
            max_mana,
            current_mana: max_mana,
            pet: None,
            duel_health_save: None,
            duel_mana_save: None,
        }
    }

    /// Check if this combatant is alive (health > 0).
    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    /// Identifier used in combat log messages, e.g. "Team 1 Mage".
    pub fn label(&self) -> String {
        format!("Team {} {}", self.team, self.class.name())
    }

    /// Whether duel vitals handling should touch this combatant's mana.
    ///
    /// True for declared mana users, and always for Druids: the class
    /// keeps a mana pool even while its declared resource is Energy.
    pub fn uses_mana(&self) -> bool {
        self.resource_type == ResourceType::Mana || self.class == CharacterClass::Druid
    }

    /// Snapshot current health into the duel slot, overwriting any
    /// abandoned save from an earlier duel.
    pub fn save_health_before_duel(&mut self) {
        self.duel_health_save = Some(self.current_health);
    }

    /// Reapply the saved health and clear the slot. No-op when empty.
    /// The restored value is clamped to the current maximum.
    pub fn restore_health_after_duel(&mut self) {
        if let Some(health) = self.duel_health_save.take() {
            self.current_health = health.min(self.max_health);
        }
    }

    /// Snapshot current mana into the duel slot.
    pub fn save_mana_before_duel(&mut self) {
        self.duel_mana_save = Some(self.current_mana);
    }

    /// Reapply the saved mana and clear the slot. No-op when empty.
    pub fn restore_mana_after_duel(&mut self) {
        if let Some(mana) = self.duel_mana_save.take() {
            self.current_mana = mana.min(self.max_mana);
        }
    }
}
