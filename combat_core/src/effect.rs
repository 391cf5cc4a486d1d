//! Timed status effect processing

use content_core::EffectKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An effect attached to a combatant, counting down in rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub turns_left: u32,
}

/// Fixed duration table, in rounds
pub fn base_duration(kind: EffectKind) -> u32 {
    match kind {
        EffectKind::Poison => 3,
        EffectKind::Burn => 3,
        EffectKind::Freeze => 1,
        EffectKind::Stun => 2,
        EffectKind::Regen => 3,
        EffectKind::Shield => 2,
        EffectKind::Curse => 3,
    }
}

/// What one round of effect processing did to a combatant
#[derive(Debug, Clone)]
pub struct EffectSummary {
    pub damage: u32,
    pub heal: u32,
    pub skip_turn: bool,
    pub attack_modifier: f64,
    pub defense_modifier: f64,
    pub messages: Vec<String>,
}

impl Default for EffectSummary {
    fn default() -> Self {
        EffectSummary {
            damage: 0,
            heal: 0,
            skip_turn: false,
            attack_modifier: 1.0,
            defense_modifier: 1.0,
            messages: Vec::new(),
        }
    }
}

/// Attach an effect at its base duration. Idempotent: an already-active kind
/// is left untouched, no refresh and no stacking.
pub fn apply(effects: &mut Vec<ActiveEffect>, kind: EffectKind) -> bool {
    if effects.iter().any(|e| e.kind == kind) {
        return false;
    }
    effects.push(ActiveEffect {
        kind,
        turns_left: base_duration(kind),
    });
    true
}

/// Process every active effect once, then tick durations down and drop the
/// expired ones. Called once per side per round, before that side acts.
///
/// Additive modifier deltas (Burn, Curse) are summed first; multiplicative
/// factors (Shield) are applied afterwards.
pub fn process(max_hp: u32, effects: &mut Vec<ActiveEffect>, rng: &mut impl Rng) -> EffectSummary {
    let mut summary = EffectSummary::default();
    let mut attack_delta = 0.0;
    let mut defense_delta = 0.0;
    let mut shield_factor = 1.0;

    for effect in effects.iter_mut() {
        match effect.kind {
            EffectKind::Poison => {
                let damage = (max_hp as f64 * rng.gen_range(0.05..0.10)) as u32;
                summary.damage += damage;
                summary.messages.push(format!("Poison: -{damage} HP"));
            }
            EffectKind::Burn => {
                let damage = (max_hp as f64 * 0.10) as u32;
                summary.damage += damage;
                defense_delta -= 0.10;
                summary
                    .messages
                    .push(format!("Burn: -{damage} HP, defense lowered"));
            }
            EffectKind::Freeze => {
                summary.skip_turn = true;
                summary.messages.push("Freeze: turn skipped".to_string());
            }
            EffectKind::Stun => {
                if rng.gen::<f64>() < 0.5 {
                    summary.skip_turn = true;
                    summary.messages.push("Stun: turn skipped".to_string());
                }
            }
            EffectKind::Regen => {
                let heal = (max_hp as f64 * rng.gen_range(0.10..0.20)) as u32;
                summary.heal += heal;
                summary.messages.push(format!("Regen: +{heal} HP"));
            }
            EffectKind::Shield => {
                shield_factor *= 0.5;
            }
            EffectKind::Curse => {
                attack_delta -= 0.10;
                defense_delta -= 0.10;
                summary
                    .messages
                    .push("Curse: attack and defense lowered".to_string());
            }
        }

        effect.turns_left = effect.turns_left.saturating_sub(1);
    }

    effects.retain(|e| e.turns_left > 0);

    summary.attack_modifier = 1.0 + attack_delta;
    summary.defense_modifier = (1.0 + defense_delta) * shield_factor;
    summary
}
