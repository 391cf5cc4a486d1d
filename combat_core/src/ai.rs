//! Enemy decision making

use content_core::{AbilityKind, ContentCatalog, EnemyDef};
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

/// What the enemy decided to do this round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnemyAction {
    /// A basic attack with its variance-rolled strategy
    Attack { damage: u32, critical: bool },
    UseAbility(String),
    Defend,
    Flee,
}

/// Mutable AI state carried across the rounds of one combat
#[derive(Debug, Clone, Default)]
pub struct AiState {
    cooldowns: HashMap<String, u32>,
    uses: HashMap<String, u32>,
    turn_count: u32,
}

impl AiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[cfg(test)]
    fn cooldown(&self, ability: &str) -> Option<u32> {
        self.cooldowns.get(ability).copied()
    }
}

/// The slice of combat state the AI looks at
#[derive(Debug, Clone, Copy)]
pub struct AiView {
    pub enemy_hp: u32,
    pub enemy_mana: u32,
    pub player_hp: u32,
    pub player_max_hp: u32,
}

#[derive(Debug, Error)]
enum AiError {
    #[error("ability '{0}' not found in catalog")]
    UnknownAbility(String),
}

/// Decide the enemy's action for this round.
///
/// Internal faults never escape: anything that goes wrong degrades to a
/// plain attack so a round can always complete.
pub fn decide(
    enemy: &EnemyDef,
    catalog: &ContentCatalog,
    view: &AiView,
    state: &mut AiState,
    rng: &mut impl Rng,
) -> EnemyAction {
    state.turn_count += 1;

    for cooldown in state.cooldowns.values_mut() {
        *cooldown -= 1;
    }
    state.cooldowns.retain(|_, cooldown| *cooldown > 0);

    match choose(enemy, catalog, view, state, rng) {
        Ok(action) => action,
        Err(error) => {
            tracing::warn!(enemy = %enemy.id, %error, "enemy AI fault, falling back to attack");
            attack_strategy(enemy, rng)
        }
    }
}

fn choose(
    enemy: &EnemyDef,
    catalog: &ContentCatalog,
    view: &AiView,
    state: &mut AiState,
    rng: &mut impl Rng,
) -> Result<EnemyAction, AiError> {
    let hp_percent = hp_fraction(view.enemy_hp, enemy.hp);
    let player_hp_percent = hp_fraction(view.player_hp, view.player_max_hp);

    if enemy.can_flee && hp_percent <= enemy.flee_threshold && rng.gen::<f64>() < enemy.flee_chance
    {
        return Ok(EnemyAction::Flee);
    }

    if enemy.can_defend
        && hp_percent <= enemy.defend_threshold
        && rng.gen::<f64>() < enemy.defend_chance
    {
        return Ok(EnemyAction::Defend);
    }

    let mut best: Option<(&str, f64)> = None;
    for name in &enemy.abilities {
        let ability = catalog
            .ability(name)
            .ok_or_else(|| AiError::UnknownAbility(name.clone()))?;

        if state.cooldowns.contains_key(name) {
            continue;
        }
        if ability.mana_cost > view.enemy_mana {
            continue;
        }
        if let Some(max_uses) = ability.max_uses {
            if state.uses.get(name).copied().unwrap_or(0) >= max_uses {
                continue;
            }
        }
        if rng.gen::<f64>() > ability.chance {
            continue;
        }

        let mut priority = ability.base_priority;
        if hp_percent <= ability.hp_threshold {
            priority += ability.threshold_bonus;
        }
        match ability.kind {
            AbilityKind::Heal if hp_percent < 0.5 => priority += 3.0,
            AbilityKind::Offensive if player_hp_percent < 0.3 => priority += 2.0,
            AbilityKind::Defensive if hp_percent < 0.3 => priority += 2.5,
            _ => {}
        }
        if ability.prefer_early && state.turn_count < 3 {
            priority += 1.5;
        } else if ability.prefer_late && state.turn_count > 5 {
            priority += 1.5;
        }

        if best.map_or(true, |(_, score)| priority > score) {
            best = Some((name.as_str(), priority));
        }
    }

    if let Some((name, _)) = best {
        let ability = catalog
            .ability(name)
            .ok_or_else(|| AiError::UnknownAbility(name.to_string()))?;
        if ability.cooldown > 0 {
            state.cooldowns.insert(name.to_string(), ability.cooldown);
        }
        if ability.max_uses.is_some() {
            *state.uses.entry(name.to_string()).or_insert(0) += 1;
        }
        return Ok(EnemyAction::UseAbility(name.to_string()));
    }

    Ok(attack_strategy(enemy, rng))
}

/// Basic attack with damage variance and an independent crit roll
fn attack_strategy(enemy: &EnemyDef, rng: &mut impl Rng) -> EnemyAction {
    let min = (enemy.attack as f64 * (1.0 - enemy.attack_variance)) as u32;
    let max = (enemy.attack as f64 * (1.0 + enemy.attack_variance)) as u32;
    let mut damage = rng.gen_range(min..=max);

    let critical = rng.gen::<f64>() < enemy.crit_chance;
    if critical {
        damage = (damage as f64 * 1.5) as u32;
    }

    EnemyAction::Attack { damage, critical }
}

fn hp_fraction(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (current as f64 / max as f64).clamp(0.0, 1.0)
}
