//! The combat state machine: one resolver owns every running session and is
//! the only mutator of their state

use crate::ai::{self, AiView, EnemyAction};
use crate::character::Character;
use crate::damage::{calculate_damage, is_critical_hit, is_evaded};
use crate::effect;
use crate::loot::{roll_loot, LootResult};
use crate::progression::grant_exp;
use crate::session::{CombatSession, MenuPhase, StatusSnapshot};
use crate::stats;
use crate::store::CharacterStore;
use crate::CombatError;
use content_core::{AbilityTarget, ContentCatalog, EnemyCategory, EnemyDef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// What the player submitted for this round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Defend,
    UseAbility(String),
    UseItem(String),
    Flee,
}

impl PlayerAction {
    fn allowed_in(&self, phase: MenuPhase) -> bool {
        match self {
            PlayerAction::Attack | PlayerAction::Defend | PlayerAction::Flee => {
                phase == MenuPhase::InCombat
            }
            PlayerAction::UseAbility(_) => phase == MenuPhase::AbilityChoice,
            PlayerAction::UseItem(_) => phase == MenuPhase::InventoryChoice,
        }
    }
}

/// Rewards granted on victory
#[derive(Debug, Clone)]
pub struct CombatRewards {
    pub loot: LootResult,
    pub leveled_up: bool,
    pub level: u32,
}

/// Penalty applied on defeat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefeatPenalty {
    pub gold_lost: u64,
}

/// How a combat ended
#[derive(Debug, Clone)]
pub enum TerminalResult {
    Victory(CombatRewards),
    Defeat(DefeatPenalty),
    Fled,
}

/// Result of one resolved round
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    Continued {
        log: Vec<String>,
        snapshot: StatusSnapshot,
    },
    Ended {
        log: Vec<String>,
        result: TerminalResult,
    },
}

/// A player input that was rejected without aborting the round. Converted to
/// an event log line; the round completes with whatever legal effects remain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionRejection {
    #[error("Not enough mana for {ability} ({required} needed, {available} left)")]
    InsufficientMana {
        ability: String,
        required: u32,
        available: u32,
    },
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("No {0} left in the inventory")]
    ItemNotOwned(String),
}

/// Flee success chance in percent, by enemy category
fn flee_success_chance(category: EnemyCategory) -> f64 {
    match category {
        EnemyCategory::Weak => 100.0,
        EnemyCategory::Normal => 50.0,
        EnemyCategory::Elite | EnemyCategory::Boss => 0.0,
    }
}

/// The orchestrating state machine. Each call resolves one full round to
/// completion; sessions of different users never share state.
pub struct CombatResolver<S: CharacterStore, R: Rng = StdRng> {
    catalog: Arc<ContentCatalog>,
    store: S,
    rng: R,
    sessions: HashMap<i64, CombatSession>,
}

impl<S: CharacterStore> CombatResolver<S, StdRng> {
    pub fn new(catalog: Arc<ContentCatalog>, store: S) -> Self {
        Self::with_rng(catalog, store, StdRng::from_entropy())
    }
}

impl<S: CharacterStore, R: Rng> CombatResolver<S, R> {
    /// Construct with a provided RNG, for deterministic testing
    pub fn with_rng(catalog: Arc<ContentCatalog>, store: S, rng: R) -> Self {
        CombatResolver {
            catalog,
            store,
            rng,
            sessions: HashMap::new(),
        }
    }

    pub fn has_session(&self, user_id: i64) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// Begin a combat against the given enemy. The character is snapshotted
    /// into the session; any leftover session for this user is replaced.
    pub fn start_combat(
        &mut self,
        character: Character,
        enemy_id: &str,
    ) -> Result<StatusSnapshot, CombatError> {
        let enemy = self
            .catalog
            .enemy(enemy_id)
            .cloned()
            .ok_or_else(|| CombatError::UnknownEnemy(enemy_id.to_string()))?;

        let (player_stats, _) =
            stats::total_stats(&character.stats, &character.equipment, &self.catalog);
        let session = CombatSession::new(character, player_stats, &enemy);
        let snapshot = session.snapshot(&enemy);
        tracing::debug!(user_id = session.user_id, enemy = %enemy.id, "combat started");
        self.sessions.insert(session.user_id, session);
        Ok(snapshot)
    }

    /// Current snapshot of a running combat
    pub fn snapshot(&self, user_id: i64) -> Result<StatusSnapshot, CombatError> {
        let session = self.session(user_id)?;
        let enemy = self.enemy_def(&session.enemy_id)?;
        Ok(session.snapshot(enemy))
    }

    pub fn open_ability_menu(&mut self, user_id: i64) -> Result<StatusSnapshot, CombatError> {
        self.transition(user_id, &[MenuPhase::InCombat], MenuPhase::AbilityChoice)
    }

    pub fn open_item_menu(&mut self, user_id: i64) -> Result<StatusSnapshot, CombatError> {
        self.transition(user_id, &[MenuPhase::InCombat], MenuPhase::InventoryChoice)
    }

    pub fn back_to_combat(&mut self, user_id: i64) -> Result<StatusSnapshot, CombatError> {
        self.transition(
            user_id,
            &[MenuPhase::AbilityChoice, MenuPhase::InventoryChoice],
            MenuPhase::InCombat,
        )
    }

    /// Resolve one full round. Steps run in fixed order: effects on both
    /// sides, player action, victory check, enemy action, defeat check.
    pub fn resolve_turn(
        &mut self,
        user_id: i64,
        action: PlayerAction,
    ) -> Result<TurnOutcome, CombatError> {
        let mut session = self
            .sessions
            .remove(&user_id)
            .ok_or_else(|| CombatError::InvalidState("no active combat session".to_string()))?;

        if !action.allowed_in(session.phase) {
            let phase = session.phase;
            self.sessions.insert(user_id, session);
            return Err(CombatError::InvalidState(format!(
                "action {action:?} not available in {phase:?}"
            )));
        }
        session.phase = MenuPhase::InCombat;

        let enemy = match self.catalog.enemy(&session.enemy_id).cloned() {
            Some(enemy) => enemy,
            None => {
                return Err(CombatError::UnknownEnemy(session.enemy_id.clone()));
            }
        };

        let mut log = Vec::new();

        // A flee attempt resolves before the round. Success discards the
        // session; failure turns this round into an enemy-only turn.
        let enemy_only = if action == PlayerAction::Flee {
            if self.rng.gen_range(0.0..100.0) < flee_success_chance(enemy.category) {
                tracing::debug!(user_id, enemy = %enemy.id, "player fled");
                log.push("You slip away from the fight!".to_string());
                return Ok(TurnOutcome::Ended {
                    log,
                    result: TerminalResult::Fled,
                });
            }
            log.push("Escape failed!".to_string());
            true
        } else {
            false
        };

        // 1. Effects on both sides: damage, then heal, clamped to [0, max]
        let player_summary = effect::process(
            session.player_stats.max_hp,
            &mut session.player_effects,
            &mut self.rng,
        );
        session.player_hp = session
            .player_hp
            .saturating_sub(player_summary.damage)
            .saturating_add(player_summary.heal)
            .min(session.player_stats.max_hp);

        let enemy_summary =
            effect::process(enemy.hp, &mut session.enemy_effects, &mut self.rng);
        session.enemy_hp = session
            .enemy_hp
            .saturating_sub(enemy_summary.damage)
            .saturating_add(enemy_summary.heal)
            .min(enemy.hp);

        log.extend(player_summary.messages.iter().cloned());
        log.extend(
            enemy_summary
                .messages
                .iter()
                .map(|m| format!("{}: {}", enemy.name, m)),
        );

        // 2. Defending lasts exactly one round
        session.player_defending = false;

        // 3. Player action, unless control effects discard it
        if !enemy_only {
            if player_summary.skip_turn {
                log.push("You cannot act this round!".to_string());
            } else {
                self.resolve_player_action(&action, &mut session, &enemy, &mut log);
            }
        }

        // 4. The enemy never acts in the round that kills it
        if session.enemy_hp == 0 {
            return self.finish_victory(session, &enemy, log);
        }

        // 5. Enemy action
        if !enemy_summary.skip_turn {
            self.resolve_enemy_turn(&mut session, &enemy, &mut log);
        }

        // 6. Defeat check
        if session.player_hp == 0 {
            return self.finish_defeat(session, log);
        }

        // 7. The session persists into the next round
        session.round += 1;
        let snapshot = session.snapshot(&enemy);
        self.sessions.insert(user_id, session);
        Ok(TurnOutcome::Continued { log, snapshot })
    }

    fn resolve_player_action(
        &mut self,
        action: &PlayerAction,
        session: &mut CombatSession,
        enemy: &EnemyDef,
        log: &mut Vec<String>,
    ) {
        match action {
            PlayerAction::Attack => {
                if is_evaded(enemy.luck, &mut self.rng) {
                    log.push(format!("{} dodges your attack!", enemy.name));
                    return;
                }
                let critical = is_critical_hit(session.player_stats.luck, &mut self.rng);
                let damage =
                    calculate_damage(session.player_stats.attack, enemy.defense, critical, false);
                session.enemy_hp = session.enemy_hp.saturating_sub(damage);
                if critical {
                    log.push(format!(
                        "Critical hit! You strike {} for {damage} damage!",
                        enemy.name
                    ));
                } else {
                    log.push(format!("You hit {} for {damage} damage", enemy.name));
                }
            }
            PlayerAction::Defend => {
                session.player_defending = true;
                log.push("You brace behind your guard".to_string());
            }
            PlayerAction::UseAbility(name) => {
                if let Err(rejection) = self.use_player_ability(name, session, enemy, log) {
                    tracing::warn!(user_id = session.user_id, %rejection, "ability rejected");
                    log.push(rejection.to_string());
                }
            }
            PlayerAction::UseItem(item_id) => {
                if let Err(rejection) = self.use_player_item(item_id, session, enemy, log) {
                    tracing::warn!(user_id = session.user_id, %rejection, "item rejected");
                    log.push(rejection.to_string());
                }
            }
            // Resolved before the round ever starts
            PlayerAction::Flee => {}
        }
    }

    fn use_player_ability(
        &mut self,
        name: &str,
        session: &mut CombatSession,
        enemy: &EnemyDef,
        log: &mut Vec<String>,
    ) -> Result<(), ActionRejection> {
        let ability = self
            .catalog
            .ability(name)
            .cloned()
            .ok_or_else(|| ActionRejection::UnknownAbility(name.to_string()))?;

        if session.player_mana < ability.mana_cost {
            return Err(ActionRejection::InsufficientMana {
                ability: ability.label().to_string(),
                required: ability.mana_cost,
                available: session.player_mana,
            });
        }
        session.player_mana -= ability.mana_cost;
        if ability.mana_cost > 0 {
            log.push(format!("You spend {} mana", ability.mana_cost));
        }

        if let Some(damage) = ability.damage {
            session.enemy_hp = session.enemy_hp.saturating_sub(damage);
            log.push(format!(
                "{}! {} takes {damage} damage",
                ability.label(),
                enemy.name
            ));
        }
        if let Some(heal) = ability.heal_amount {
            session.player_hp = session
                .player_hp
                .saturating_add(heal)
                .min(session.player_stats.max_hp);
            log.push(format!("{}: you recover {heal} HP", ability.label()));
        }
        if let Some(kind) = ability.applies {
            match ability.target {
                AbilityTarget::Opponent => {
                    if effect::apply(&mut session.enemy_effects, kind) {
                        log.push(format!("{} is afflicted with {kind}!", enemy.name));
                    } else {
                        log.push(format!("{} is already affected by {kind}", enemy.name));
                    }
                }
                AbilityTarget::Caster => {
                    if effect::apply(&mut session.player_effects, kind) {
                        log.push(format!("You gain {kind}!"));
                    } else {
                        log.push(format!("{kind} is already active"));
                    }
                }
            }
        }
        Ok(())
    }

    fn use_player_item(
        &mut self,
        item_id: &str,
        session: &mut CombatSession,
        enemy: &EnemyDef,
        log: &mut Vec<String>,
    ) -> Result<(), ActionRejection> {
        let item = self
            .catalog
            .item(item_id)
            .cloned()
            .ok_or_else(|| ActionRejection::UnknownItem(item_id.to_string()))?;

        if !item.is_consumable() {
            log.push(format!("{} cannot be used in combat", item.name));
            return Ok(());
        }
        if !session.character.remove_item(&item.id) {
            return Err(ActionRejection::ItemNotOwned(item.name));
        }

        if let Some(heal) = item.heal_amount {
            session.player_hp = session
                .player_hp
                .saturating_add(heal)
                .min(session.player_stats.max_hp);
            log.push(format!("{}: +{heal} HP", item.name));
        }
        if let Some(kind) = item.applies {
            if effect::apply(&mut session.enemy_effects, kind) {
                log.push(format!("{}! {} is afflicted with {kind}!", item.name, enemy.name));
            } else {
                log.push(format!("{} is already affected by {kind}", enemy.name));
            }
        }
        Ok(())
    }

    fn resolve_enemy_turn(
        &mut self,
        session: &mut CombatSession,
        enemy: &EnemyDef,
        log: &mut Vec<String>,
    ) {
        let view = AiView {
            enemy_hp: session.enemy_hp,
            enemy_mana: session.enemy_mana,
            player_hp: session.player_hp,
            player_max_hp: session.player_stats.max_hp,
        };
        let catalog = Arc::clone(&self.catalog);
        let action = ai::decide(enemy, &catalog, &view, &mut session.ai, &mut self.rng);

        match action {
            EnemyAction::Attack { .. } => {
                if is_evaded(session.player_stats.luck, &mut self.rng) {
                    log.push(format!("You dodge {}'s attack!", enemy.name));
                    return;
                }
                let critical = is_critical_hit(enemy.luck, &mut self.rng);
                let damage = calculate_damage(
                    enemy.attack,
                    session.player_stats.defense,
                    critical,
                    session.player_defending,
                );
                session.player_hp = session.player_hp.saturating_sub(damage);
                if critical {
                    log.push(format!(
                        "{} lands a critical hit for {damage} damage!",
                        enemy.name
                    ));
                } else {
                    log.push(format!("{} attacks you for {damage} damage", enemy.name));
                }
            }
            EnemyAction::UseAbility(name) => {
                let Some(ability) = catalog.ability(&name).cloned() else {
                    tracing::warn!(ability = %name, "enemy ability missing from catalog");
                    return;
                };
                session.enemy_mana = session.enemy_mana.saturating_sub(ability.mana_cost);
                log.push(format!("{} uses {}!", enemy.name, ability.label()));

                if let Some(damage) = ability.damage {
                    session.player_hp = session.player_hp.saturating_sub(damage);
                    log.push(format!("You take {damage} damage"));
                }
                if let Some(heal) = ability.heal_amount {
                    session.enemy_hp = session.enemy_hp.saturating_add(heal).min(enemy.hp);
                    log.push(format!("{} recovers {heal} HP", enemy.name));
                }
                if let Some(kind) = ability.applies {
                    match ability.target {
                        AbilityTarget::Opponent => {
                            if effect::apply(&mut session.player_effects, kind) {
                                log.push(format!("You are afflicted with {kind}!"));
                            }
                        }
                        AbilityTarget::Caster => {
                            if effect::apply(&mut session.enemy_effects, kind) {
                                log.push(format!("{} gains {kind}!", enemy.name));
                            }
                        }
                    }
                }
            }
            EnemyAction::Defend => {
                log.push(format!("{} takes a defensive stance", enemy.name));
            }
            EnemyAction::Flee => {
                log.push(format!("{} tries to flee, but cannot escape!", enemy.name));
            }
        }
    }

    fn finish_victory(
        &mut self,
        mut session: CombatSession,
        enemy: &EnemyDef,
        mut log: Vec<String>,
    ) -> Result<TurnOutcome, CombatError> {
        log.push(format!("{} is defeated!", enemy.name));

        let loot = roll_loot(
            session.player_stats.luck,
            enemy.category,
            &self.catalog,
            &mut self.rng,
        );

        let character = &mut session.character;
        character.exp += loot.xp;
        character.gold += loot.gold;
        character.stats.hp = character.stats.max_hp;
        character.current_mana = character.stats.max_mana;
        for item in &loot.items {
            character.inventory.push(item.item_id.clone());
        }

        let leveled_up = grant_exp(character);
        if leveled_up {
            log.push(format!("Level up! You are now level {}", character.level));
        }

        tracing::debug!(
            user_id = session.user_id,
            gold = loot.gold,
            xp = loot.xp,
            "combat won"
        );
        self.store.save(character)?;

        let level = character.level;
        Ok(TurnOutcome::Ended {
            log,
            result: TerminalResult::Victory(CombatRewards {
                loot,
                leveled_up,
                level,
            }),
        })
    }

    fn finish_defeat(
        &mut self,
        mut session: CombatSession,
        mut log: Vec<String>,
    ) -> Result<TurnOutcome, CombatError> {
        let character = &mut session.character;
        let gold_lost = character.gold / 10;
        character.gold -= gold_lost;
        character.stats.hp = 1;
        character.current_mana = character.stats.max_mana;

        log.push("You collapse, defeated...".to_string());
        if gold_lost > 0 {
            log.push(format!("You lose {gold_lost} gold"));
        }

        tracing::debug!(user_id = session.user_id, gold_lost, "combat lost");
        self.store.save(character)?;

        Ok(TurnOutcome::Ended {
            log,
            result: TerminalResult::Defeat(DefeatPenalty { gold_lost }),
        })
    }

    fn session(&self, user_id: i64) -> Result<&CombatSession, CombatError> {
        self.sessions
            .get(&user_id)
            .ok_or_else(|| CombatError::InvalidState("no active combat session".to_string()))
    }

    fn enemy_def(&self, enemy_id: &str) -> Result<&EnemyDef, CombatError> {
        self.catalog
            .enemy(enemy_id)
            .ok_or_else(|| CombatError::UnknownEnemy(enemy_id.to_string()))
    }

    fn transition(
        &mut self,
        user_id: i64,
        from: &[MenuPhase],
        to: MenuPhase,
    ) -> Result<StatusSnapshot, CombatError> {
        let session = self
            .sessions
            .get_mut(&user_id)
            .ok_or_else(|| CombatError::InvalidState("no active combat session".to_string()))?;
        if !from.contains(&session.phase) {
            return Err(CombatError::InvalidState(format!(
                "cannot move to {to:?} from {:?}",
                session.phase
            )));
        }
        session.phase = to;
        let enemy = self
            .catalog
            .enemy(&session.enemy_id)
            .ok_or_else(|| CombatError::UnknownEnemy(session.enemy_id.clone()))?;
        Ok(session.snapshot(enemy))
    }
}
