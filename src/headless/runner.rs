//! Headless duel execution
//!
//! Runs a scripted duel without any graphical output: two combatants are
//! spawned with realistic pre-duel wear (missing health, spent mana,
//! abilities on cooldown), a duel is started and fought, and the duel
//! ends with the configured outcome. The resulting state transitions are
//! captured in the combat log and a `DuelReport`.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::combat::abilities::{AbilityConfigPlugin, AbilityDefinitions, AbilityType};
use crate::combat::components::{CharacterClass, Combatant, Pet};
use crate::combat::duel::{DuelEndEvent, DuelOutcome, DuelStartEvent};
use crate::combat::log::{CombatLog, CombatLogEventType, DuelMetadata};
use crate::combat::spell_history::SpellHistory;
use crate::combat::DuelPlugin;
use crate::settings::DuelSettings;

use super::config::{DuelScript, HeadlessDuelConfig};

/// Frames spent in each scripted phase before moving on.
const PREP_FRAMES: u32 = 2;
const DUEL_FRAMES: u32 = 6;
const CONCLUDE_FRAMES: u32 = 2;

/// Result of a completed headless duel.
///
/// Provides programmatic access to post-duel state for testing and
/// analysis.
#[derive(Debug, Clone)]
pub struct DuelReport {
    /// How the duel ended
    pub outcome: DuelOutcome,
    /// Winning side (1 or 2) for decisive duels, None otherwise
    pub winner: Option<u8>,
    /// Challenger state summary
    pub challenger: CombatantReport,
    /// Opponent state summary
    pub opponent: CombatantReport,
    /// Path the duel log was written to
    pub log_path: Option<String>,
}

/// State summary for one duelist after the duel.
#[derive(Debug, Clone)]
pub struct CombatantReport {
    /// Class name (e.g. "Mage")
    pub class_name: String,
    /// Health immediately before the duel started
    pub pre_duel_health: f32,
    /// Health after the duel concluded
    pub final_health: f32,
    /// Mana immediately before the duel started
    pub pre_duel_mana: f32,
    /// Mana after the duel concluded
    pub final_mana: f32,
    /// Number of cooldown entries still active after the duel
    pub active_cooldowns: usize,
}

/// Seedable RNG for scripted wear and duel damage rolls.
#[derive(Resource)]
pub struct DuelRng(StdRng);

impl DuelRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Fraction of a resource pool left after pre-duel wear
    fn wear_fraction(&mut self) -> f32 {
        self.0.gen_range(0.35..0.75)
    }

    /// Damage dealt by one scripted ability use
    fn damage_roll(&mut self) -> f32 {
        self.0.gen_range(8.0..20.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DuelPhase {
    /// Duelists spawned, waiting to fire the start event
    Prep,
    /// Duel running: scripted ability usage and damage
    InDuel,
    /// End event fired, waiting for handlers before reporting
    Conclude,
    Complete,
}

/// Pre-duel vitals captured right before the start event fires.
#[derive(Clone, Copy)]
struct PreDuelVitals {
    health: f32,
    mana: f32,
}

/// Resource tracking the scripted duel's progress.
#[derive(Resource)]
pub struct HeadlessDuelState {
    script: DuelScript,
    phase: DuelPhase,
    frames_in_phase: u32,
    output_path: Option<String>,
    challenger: Option<Entity>,
    opponent: Option<Entity>,
    challenger_pre: Option<PreDuelVitals>,
    opponent_pre: Option<PreDuelVitals>,
    /// Populated when the duel completes
    pub report: Option<DuelReport>,
}

/// Abilities a class burns before the duel (pre-duel wear).
/// The first entry is short recovery, later entries may be long.
fn wear_abilities(class: CharacterClass) -> &'static [AbilityType] {
    match class {
        CharacterClass::Warrior => &[AbilityType::MortalStrike, AbilityType::Recklessness],
        CharacterClass::Mage => &[AbilityType::FireBlast, AbilityType::IceBlock],
        CharacterClass::Rogue => &[AbilityType::Vanish, AbilityType::Preparation],
        CharacterClass::Priest => &[AbilityType::MindBlast, AbilityType::PsychicScream],
        CharacterClass::Warlock => &[AbilityType::DeathCoil, AbilityType::Shadowbolt],
        CharacterClass::Druid => &[AbilityType::Barkskin, AbilityType::Rebirth],
    }
}

/// The ability a class spams during the scripted duel.
fn duel_ability(class: CharacterClass) -> AbilityType {
    match class {
        CharacterClass::Warrior => AbilityType::MortalStrike,
        CharacterClass::Mage => AbilityType::FireBlast,
        CharacterClass::Rogue => AbilityType::SinisterStrike,
        CharacterClass::Priest => AbilityType::MindBlast,
        CharacterClass::Warlock => AbilityType::Shadowbolt,
        CharacterClass::Druid => AbilityType::Barkskin,
    }
}

/// Spawn one duelist with scripted pre-duel wear applied.
fn spawn_duelist(
    commands: &mut Commands,
    abilities: &AbilityDefinitions,
    rng: &mut DuelRng,
    team: u8,
    class: CharacterClass,
) -> Entity {
    let mut combatant = Combatant::new(team, class);
    combatant.current_health = combatant.max_health * rng.wear_fraction();
    if combatant.uses_mana() {
        combatant.current_mana = combatant.max_mana * rng.wear_fraction();
    }

    let mut history = SpellHistory::default();
    for ability in wear_abilities(class) {
        history.start_cooldown(*ability, abilities.get_unchecked(ability));
    }
    // The challenger carries one externally-held cooldown into the duel
    if team == 1 {
        history.set_on_hold(&wear_abilities(class)[0], true);
    }

    let entity = commands.spawn((combatant, history)).id();

    // Warlocks bring their Felhunter, with its own worn cooldowns
    if class == CharacterClass::Warlock {
        let mut pet_history = SpellHistory::default();
        for ability in [AbilityType::SpellLock, AbilityType::DevourMagic] {
            pet_history.start_cooldown(ability, abilities.get_unchecked(&ability));
        }
        let pet_entity = commands.spawn((Pet { owner: entity }, pet_history)).id();
        commands.entity(entity).entry::<Combatant>().and_modify(move |mut c| {
            c.pet = Some(pet_entity);
        });
    }

    entity
}

/// Startup: spawn both duelists and record the scripted scenario.
fn headless_setup_duel(
    mut commands: Commands,
    abilities: Res<AbilityDefinitions>,
    mut rng: ResMut<DuelRng>,
    mut state: ResMut<HeadlessDuelState>,
    mut combat_log: ResMut<CombatLog>,
) {
    combat_log.clear();
    combat_log.log(
        CombatLogEventType::DuelEvent,
        format!(
            "{} challenges {} to a duel",
            state.script.challenger.name(),
            state.script.opponent.name()
        ),
    );

    let challenger = spawn_duelist(&mut commands, &abilities, &mut rng, 1, state.script.challenger);
    let opponent = spawn_duelist(&mut commands, &abilities, &mut rng, 2, state.script.opponent);

    state.challenger = Some(challenger);
    state.opponent = Some(opponent);

    info!(
        "Headless duel setup complete: {} vs {}",
        state.script.challenger.name(),
        state.script.opponent.name()
    );
}

/// Drive the scripted duel through its phases.
fn headless_drive_duel(
    mut state: ResMut<HeadlessDuelState>,
    mut rng: ResMut<DuelRng>,
    abilities: Res<AbilityDefinitions>,
    mut start_events: EventWriter<DuelStartEvent>,
    mut end_events: EventWriter<DuelEndEvent>,
    mut combat_log: ResMut<CombatLog>,
    mut duelists: Query<(&mut Combatant, &mut SpellHistory), Without<Pet>>,
) {
    let (Some(challenger), Some(opponent)) = (state.challenger, state.opponent) else {
        return;
    };
    state.frames_in_phase += 1;

    match state.phase {
        DuelPhase::Prep => {
            if state.frames_in_phase < PREP_FRAMES {
                return;
            }
            // Capture vitals as they stand right before the duel starts
            for (entity, slot) in [(challenger, 1), (opponent, 2)] {
                if let Ok((combatant, _)) = duelists.get_mut(entity) {
                    let vitals = PreDuelVitals {
                        health: combatant.current_health,
                        mana: combatant.current_mana,
                    };
                    if slot == 1 {
                        state.challenger_pre = Some(vitals);
                    } else {
                        state.opponent_pre = Some(vitals);
                    }
                }
            }
            start_events.send(DuelStartEvent {
                challenger,
                opponent,
            });
            state.phase = DuelPhase::InDuel;
            state.frames_in_phase = 0;
        }
        DuelPhase::InDuel => {
            // Scripted exchange: both sides use an ability and trade damage
            for (attacker, defender) in [(challenger, opponent), (opponent, challenger)] {
                let class = match duelists.get_mut(attacker) {
                    Ok((combatant, mut history)) => {
                        let ability = duel_ability(combatant.class);
                        let config = abilities.get_unchecked(&ability);
                        history.start_cooldown(ability, config);
                        combat_log.log(
                            CombatLogEventType::AbilityUsed,
                            format!("{} uses {}", combatant.label(), config.name),
                        );
                        combatant.class
                    }
                    Err(_) => continue,
                };
                if let Ok((mut combatant, _)) = duelists.get_mut(defender) {
                    let damage = rng.damage_roll();
                    // Duels stop at the killing blow: never drop below 1
                    combatant.current_health = (combatant.current_health - damage).max(1.0);
                    combat_log.log(
                        CombatLogEventType::Damage,
                        format!("{} hit by {} for {:.0}", combatant.label(), class.name(), damage),
                    );
                }
            }

            if state.frames_in_phase >= DUEL_FRAMES {
                let (winner, loser) = if state.script.winner == 1 {
                    (challenger, opponent)
                } else {
                    (opponent, challenger)
                };
                end_events.send(DuelEndEvent {
                    winner,
                    loser,
                    outcome: state.script.outcome,
                });
                state.phase = DuelPhase::Conclude;
                state.frames_in_phase = 0;
            }
        }
        DuelPhase::Conclude => {
            if state.frames_in_phase < CONCLUDE_FRAMES {
                return;
            }
            let report = build_duel_report(&state, &mut duelists, &combat_log);
            state.report = Some(report);
            state.phase = DuelPhase::Complete;
            state.frames_in_phase = 0;
        }
        DuelPhase::Complete => {}
    }
}

/// Build the final report and save the duel log.
fn build_duel_report(
    state: &HeadlessDuelState,
    duelists: &mut Query<(&mut Combatant, &mut SpellHistory), Without<Pet>>,
    combat_log: &CombatLog,
) -> DuelReport {
    let mut summarize = |entity: Option<Entity>, pre: Option<PreDuelVitals>| {
        let (combatant, history) = entity
            .and_then(|e| duelists.get_mut(e).ok())
            .expect("duelist despawned mid-script");
        let pre = pre.unwrap_or(PreDuelVitals {
            health: combatant.max_health,
            mana: combatant.max_mana,
        });
        CombatantReport {
            class_name: combatant.class.name().to_string(),
            pre_duel_health: pre.health,
            final_health: combatant.current_health,
            pre_duel_mana: pre.mana,
            final_mana: combatant.current_mana,
            active_cooldowns: history.len(),
        }
    };

    let challenger = summarize(state.challenger, state.challenger_pre);
    let opponent = summarize(state.opponent, state.opponent_pre);

    let winner = match state.script.outcome {
        DuelOutcome::Won => Some(state.script.winner),
        DuelOutcome::Interrupted | DuelOutcome::Fled => None,
    };

    let metadata = DuelMetadata {
        challenger: challenger.class_name.clone(),
        opponent: opponent.class_name.clone(),
        outcome: format!("{:?}", state.script.outcome),
        winner,
    };

    let log_path = match combat_log.save_to_file(&metadata, state.output_path.as_deref()) {
        Ok(filename) => {
            println!("Duel complete. Log saved to: {}", filename);
            Some(filename)
        }
        Err(e) => {
            eprintln!("Failed to save duel log: {}", e);
            None
        }
    };

    DuelReport {
        outcome: state.script.outcome,
        winner,
        challenger,
        opponent,
        log_path,
    }
}

/// Exit the app when the scripted duel is complete.
fn headless_exit_on_complete(
    state: Res<HeadlessDuelState>,
    mut exit: EventWriter<AppExit>,
) {
    if state.phase == DuelPhase::Complete {
        exit.send(AppExit::Success);
    }
}

/// Run a headless duel with the given configuration.
pub fn run_headless_duel(config: HeadlessDuelConfig) -> Result<DuelReport, String> {
    config.validate()?;
    let script = config.to_duel_script()?;

    // Settings from file, with per-run overrides from the duel config
    let mut settings = DuelSettings::load();
    if let Some(flag) = config.reset_duel_cooldowns {
        settings.reset_duel_cooldowns = flag;
    }
    if let Some(flag) = config.reset_duel_health_mana {
        settings.reset_duel_health_mana = flag;
    }

    let rng = match config.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            DuelRng::from_seed(seed)
        }
        None => DuelRng::from_entropy(),
    };

    println!("Starting headless duel...");
    println!("  Challenger: {}", config.challenger);
    println!("  Opponent:   {}", config.opponent);
    println!("  Outcome:    {}", config.outcome);

    let mut app = App::new();
    app
        // Minimal plugins - no window, no rendering
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        // Load ability metadata from config
        .add_plugins(AbilityConfigPlugin)
        // Duel reset systems
        .add_plugins(DuelPlugin)
        .insert_resource(settings)
        .insert_resource(rng)
        .insert_resource(HeadlessDuelState {
            script,
            phase: DuelPhase::Prep,
            frames_in_phase: 0,
            output_path: config.output_path.clone(),
            challenger: None,
            opponent: None,
            challenger_pre: None,
            opponent_pre: None,
            report: None,
        })
        .add_systems(Startup, headless_setup_duel)
        .add_systems(Update, headless_drive_duel)
        .add_systems(PostUpdate, headless_exit_on_complete);

    app.run();

    app.world_mut()
        .resource_mut::<HeadlessDuelState>()
        .report
        .take()
        .ok_or_else(|| "Headless duel did not complete".to_string())
}
