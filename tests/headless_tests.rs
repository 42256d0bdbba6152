//! Integration tests for headless duel execution
//!
//! These tests verify that:
//! - Duel configs parse and validate correctly
//! - Duel reports are accessible programmatically
//! - Combat log messages follow the expected format

use duelsim::headless::{CombatantReport, DuelReport, HeadlessDuelConfig};
use duelsim::{CombatLog, CombatLogEventType, DuelOutcome};
use regex::Regex;

/// Helper to create a basic duel config
fn create_config(challenger: &str, opponent: &str, outcome: &str, seed: Option<u64>) -> HeadlessDuelConfig {
    HeadlessDuelConfig {
        challenger: challenger.to_string(),
        opponent: opponent.to_string(),
        outcome: outcome.to_string(),
        winner: 1,
        random_seed: seed,
        output_path: None,
        reset_duel_cooldowns: None,
        reset_duel_health_mana: None,
    }
}

#[test]
fn test_config_with_seed() {
    let config = create_config("Warrior", "Priest", "Won", Some(42));

    assert!(config.validate().is_ok());
    assert_eq!(config.random_seed, Some(42));
}

#[test]
fn test_config_without_seed() {
    let config = create_config("Mage", "Druid", "Fled", None);

    assert!(config.validate().is_ok());
    assert!(config.random_seed.is_none());
}

#[test]
fn test_config_rejects_unknown_outcome() {
    let config = create_config("Mage", "Druid", "Stalemate", None);
    assert!(config.validate().is_err());
}

#[test]
fn test_duel_script_maps_outcomes() {
    for (name, expected) in [
        ("Won", DuelOutcome::Won),
        ("Interrupted", DuelOutcome::Interrupted),
        ("Fled", DuelOutcome::Fled),
    ] {
        let script = create_config("Rogue", "Warlock", name, None)
            .to_duel_script()
            .unwrap();
        assert_eq!(script.outcome, expected);
    }
}

#[test]
fn test_duel_report_fields() {
    let report = DuelReport {
        outcome: DuelOutcome::Won,
        winner: Some(1),
        challenger: CombatantReport {
            class_name: "Mage".to_string(),
            pre_duel_health: 90.0,
            final_health: 90.0,
            pre_duel_mana: 120.0,
            final_mana: 120.0,
            active_cooldowns: 1,
        },
        opponent: CombatantReport {
            class_name: "Druid".to_string(),
            pre_duel_health: 110.0,
            final_health: 110.0,
            pre_duel_mana: 70.0,
            final_mana: 70.0,
            active_cooldowns: 0,
        },
        log_path: None,
    };

    assert_eq!(report.winner, Some(1));
    assert_eq!(report.challenger.class_name, "Mage");
    assert_eq!(
        report.challenger.pre_duel_health,
        report.challenger.final_health,
        "a won duel restores pre-duel health"
    );
}

// =============================================================================
// Combat Log Format
// =============================================================================

#[test]
fn test_cooldown_log_messages_identify_the_combatant() {
    let mut log = CombatLog::default();
    log.log(
        CombatLogEventType::Cooldowns,
        "Team 1 Mage: cooldowns saved and reset for duel".to_string(),
    );
    log.log(
        CombatLogEventType::Cooldowns,
        "Team 2 Druid: cooldowns restored after duel".to_string(),
    );

    let pattern = Regex::new(r"^Team [12] \w+: cooldowns (saved and reset|restored)").unwrap();
    for entry in log.filter_by_type(CombatLogEventType::Cooldowns) {
        assert!(
            pattern.is_match(&entry.message),
            "unexpected log format: {}",
            entry.message
        );
    }
}

#[test]
fn test_duel_event_entries_are_filterable() {
    let mut log = CombatLog::default();
    log.log(CombatLogEventType::DuelEvent, "Duel started!".to_string());
    log.log(CombatLogEventType::Vitals, "Team 1 Mage: vitals saved and reset for duel".to_string());
    log.log(CombatLogEventType::DuelEvent, "Duel won!".to_string());

    assert_eq!(log.filter_by_type(CombatLogEventType::DuelEvent).len(), 2);
    assert_eq!(log.filter_by_type(CombatLogEventType::Vitals).len(), 1);
}
