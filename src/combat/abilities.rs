//! Data-Driven Ability Metadata
//!
//! Ability recovery metadata is loaded from `assets/config/abilities.ron`
//! instead of being hardcoded in Rust.
//!
//! ## Benefits
//! - Balance changes don't require recompilation
//! - Easier to review and modify cooldown values
//! - Validates all abilities exist at startup
//!
//! ## Usage
//! ```ignore
//! fn my_system(abilities: Res<AbilityDefinitions>) {
//!     let def = abilities.get_unchecked(&AbilityType::IceBlock);
//!     println!("Ice Block cooldown: {}s", def.cooldown);
//! }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All abilities known to the simulator, including pet abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityType {
    // Mage
    Frostbolt,
    FireBlast,
    IceBlock,
    Evocation,
    // Warrior
    MortalStrike,
    Recklessness,
    ShieldWall,
    // Rogue
    SinisterStrike,
    Vanish,
    Preparation,
    // Priest
    MindBlast,
    PsychicScream,
    // Warlock
    Shadowbolt,
    DeathCoil,
    // Druid
    Barkskin,
    Innervate,
    Rebirth,
    // Felhunter (pet)
    SpellLock,
    DevourMagic,
}

/// Recovery metadata for a single ability.
///
/// `cooldown` is the individual recovery time, `category_cooldown` the
/// shared-category recovery time. Both in seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AbilityConfig {
    /// Display name of the ability
    pub name: String,
    /// Recovery time after use in seconds (0.0 = no cooldown)
    #[serde(default)]
    pub cooldown: f32,
    /// Shared-category recovery time in seconds (0.0 = no category cooldown)
    #[serde(default)]
    pub category_cooldown: f32,
}

impl AbilityConfig {
    /// Returns true if using this ability starts any recovery timer
    pub fn has_cooldown(&self) -> bool {
        self.cooldown > 0.0 || self.category_cooldown > 0.0
    }
}

/// Root structure for the abilities.ron file
#[derive(Debug, Serialize, Deserialize)]
pub struct AbilitiesConfig {
    pub abilities: HashMap<AbilityType, AbilityConfig>,
}

/// Resource containing all ability definitions.
///
/// Loaded from `assets/config/abilities.ron` at startup.
/// Access via `Res<AbilityDefinitions>` in systems.
#[derive(Resource)]
pub struct AbilityDefinitions {
    definitions: HashMap<AbilityType, AbilityConfig>,
}

impl Default for AbilityDefinitions {
    /// Load ability definitions from the default config file.
    /// Panics if the file cannot be loaded - use for tests only.
    fn default() -> Self {
        load_ability_definitions()
            .expect("Failed to load ability definitions in Default impl")
    }
}

impl AbilityDefinitions {
    /// Create from a loaded config
    pub fn new(config: AbilitiesConfig) -> Self {
        Self {
            definitions: config.abilities,
        }
    }

    /// Get the configuration for an ability type
    pub fn get(&self, ability: &AbilityType) -> Option<&AbilityConfig> {
        self.definitions.get(ability)
    }

    /// Get the configuration for an ability type, panicking if not found.
    ///
    /// An ability that sits in a combatant's cooldown set but has no
    /// definition is a contract violation between the spell history and
    /// this table, so the panic is deliberate.
    pub fn get_unchecked(&self, ability: &AbilityType) -> &AbilityConfig {
        self.definitions.get(ability)
            .unwrap_or_else(|| panic!("Ability {:?} not found in definitions", ability))
    }

    /// Check if all expected ability types are defined
    pub fn validate(&self) -> Result<(), Vec<AbilityType>> {
        let expected_abilities = [
            AbilityType::Frostbolt,
            AbilityType::FireBlast,
            AbilityType::IceBlock,
            AbilityType::Evocation,
            AbilityType::MortalStrike,
            AbilityType::Recklessness,
            AbilityType::ShieldWall,
            AbilityType::SinisterStrike,
            AbilityType::Vanish,
            AbilityType::Preparation,
            AbilityType::MindBlast,
            AbilityType::PsychicScream,
            AbilityType::Shadowbolt,
            AbilityType::DeathCoil,
            AbilityType::Barkskin,
            AbilityType::Innervate,
            AbilityType::Rebirth,
            AbilityType::SpellLock,
            AbilityType::DevourMagic,
        ];

        let missing: Vec<AbilityType> = expected_abilities
            .into_iter()
            .filter(|ability| !self.definitions.contains_key(ability))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// Get all ability types that are defined
    pub fn ability_types(&self) -> impl Iterator<Item = &AbilityType> {
        self.definitions.keys()
    }
}

/// Load ability definitions from assets/config/abilities.ron
pub fn load_ability_definitions() -> Result<AbilityDefinitions, String> {
    let config_path = "assets/config/abilities.ron";

    let contents = std::fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path, e))?;

    let config: AbilitiesConfig = ron::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", config_path, e))?;

    let definitions = AbilityDefinitions::new(config);

    // Validate all expected abilities are defined
    definitions.validate()
        .map_err(|missing| format!(
            "Missing ability definitions: {:?}",
            missing
        ))?;

    info!("Loaded {} ability definitions from {}", definitions.definitions.len(), config_path);

    Ok(definitions)
}

/// Bevy plugin for ability metadata loading
pub struct AbilityConfigPlugin;

impl Plugin for AbilityConfigPlugin {
    fn build(&self, app: &mut App) {
        match load_ability_definitions() {
            Ok(definitions) => {
                app.insert_resource(definitions);
            }
            Err(e) => {
                // The duel systems assume every cooldown entry has metadata,
                // so an incomplete table must not reach runtime.
                panic!("Failed to load ability definitions: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_cooldown() {
        let config = AbilityConfig {
            name: "Test".to_string(),
            cooldown: 8.0,
            category_cooldown: 0.0,
        };
        assert!(config.has_cooldown());

        let no_cd = AbilityConfig {
            name: "Test".to_string(),
            cooldown: 0.0,
            category_cooldown: 0.0,
        };
        assert!(!no_cd.has_cooldown());
    }

    #[test]
    fn test_get_unknown_ability_is_none() {
        let definitions = AbilityDefinitions {
            definitions: HashMap::new(),
        };
        assert!(definitions.get(&AbilityType::Frostbolt).is_none());
    }

    #[test]
    #[should_panic(expected = "not found in definitions")]
    fn test_get_unchecked_unknown_ability_panics() {
        let definitions = AbilityDefinitions {
            definitions: HashMap::new(),
        };
        definitions.get_unchecked(&AbilityType::Frostbolt);
    }
}
