//! JSON configuration parsing for headless duels
//!
//! Parses JSON duel configurations into the simulator's script format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::components::CharacterClass;
use crate::combat::duel::DuelOutcome;

/// Headless duel configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessDuelConfig {
    /// Challenger class name (team 1)
    pub challenger: String,
    /// Opponent class name (team 2)
    pub opponent: String,
    /// How the duel ends: "Won", "Interrupted" or "Fled" (default: "Won")
    #[serde(default = "default_outcome")]
    pub outcome: String,
    /// Which side wins a decisive duel: 1 = challenger, 2 = opponent
    #[serde(default = "default_winner")]
    pub winner: u8,
    /// Random seed for deterministic pre-duel wear and duel damage
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Custom output path for the duel log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Override the cooldown reset toggle for this run
    #[serde(default)]
    pub reset_duel_cooldowns: Option<bool>,
    /// Override the health/mana reset toggle for this run
    #[serde(default)]
    pub reset_duel_health_mana: Option<bool>,
}

fn default_outcome() -> String {
    "Won".to_string()
}

fn default_winner() -> u8 {
    1
}

impl Default for HeadlessDuelConfig {
    /// A built-in default duel: Mage challenges Druid and wins.
    fn default() -> Self {
        Self {
            challenger: "Mage".to_string(),
            opponent: "Druid".to_string(),
            outcome: default_outcome(),
            winner: default_winner(),
            random_seed: None,
            output_path: None,
            reset_duel_cooldowns: None,
            reset_duel_health_mana: None,
        }
    }
}

/// Validated duel script derived from a `HeadlessDuelConfig`.
#[derive(Debug, Clone, Copy)]
pub struct DuelScript {
    pub challenger: CharacterClass,
    pub opponent: CharacterClass,
    pub outcome: DuelOutcome,
    pub winner: u8,
}

impl HeadlessDuelConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessDuelConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        Self::parse_class(&self.challenger)?;
        Self::parse_class(&self.opponent)?;
        Self::parse_outcome(&self.outcome)?;

        if self.winner != 1 && self.winner != 2 {
            return Err(format!("winner must be 1 or 2, got {}", self.winner));
        }

        Ok(())
    }

    /// Parse a class name string into CharacterClass
    fn parse_class(name: &str) -> Result<CharacterClass, String> {
        match name {
            "Warrior" => Ok(CharacterClass::Warrior),
            "Mage" => Ok(CharacterClass::Mage),
            "Rogue" => Ok(CharacterClass::Rogue),
            "Priest" => Ok(CharacterClass::Priest),
            "Warlock" => Ok(CharacterClass::Warlock),
            "Druid" => Ok(CharacterClass::Druid),
            _ => Err(format!(
                "Unknown class: '{}'. Valid classes: Warrior, Mage, Rogue, Priest, Warlock, Druid",
                name
            )),
        }
    }

    /// Parse an outcome name string into DuelOutcome
    fn parse_outcome(name: &str) -> Result<DuelOutcome, String> {
        match name {
            "Won" => Ok(DuelOutcome::Won),
            "Interrupted" => Ok(DuelOutcome::Interrupted),
            "Fled" => Ok(DuelOutcome::Fled),
            _ => Err(format!(
                "Unknown outcome: '{}'. Valid outcomes: Won, Interrupted, Fled",
                name
            )),
        }
    }

    /// Convert to the validated script format
    pub fn to_duel_script(&self) -> Result<DuelScript, String> {
        Ok(DuelScript {
            challenger: Self::parse_class(&self.challenger)?,
            opponent: Self::parse_class(&self.opponent)?,
            outcome: Self::parse_outcome(&self.outcome)?,
            winner: self.winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HeadlessDuelConfig::default();
        assert!(config.validate().is_ok());

        let script = config.to_duel_script().unwrap();
        assert_eq!(script.challenger, CharacterClass::Mage);
        assert_eq!(script.opponent, CharacterClass::Druid);
        assert_eq!(script.outcome, DuelOutcome::Won);
        assert_eq!(script.winner, 1);
    }

    #[test]
    fn test_unknown_class_rejected() {
        let config = HeadlessDuelConfig {
            challenger: "Paladin".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_outcome_rejected() {
        let config = HeadlessDuelConfig {
            outcome: "Draw".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_winner_rejected() {
        let config = HeadlessDuelConfig {
            winner: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_with_defaults() {
        let json = r#"{"challenger": "Warrior", "opponent": "Warlock"}"#;
        let config: HeadlessDuelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.outcome, "Won");
        assert_eq!(config.winner, 1);
        assert!(config.random_seed.is_none());
    }
}
