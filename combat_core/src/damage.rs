//! Hit, crit and damage formulas shared by both sides of a combat

use rand::Rng;

/// Critical hit chance in percent
pub fn crit_chance(luck: u32) -> f64 {
    5.0 + luck as f64 * 0.5
}

/// Evasion chance in percent, rolled against the defender's luck
pub fn evade_chance(luck: u32) -> f64 {
    2.0 + luck as f64 * 0.1
}

/// Roll whether an attack lands critically
pub fn is_critical_hit(luck: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(0.0..100.0) < crit_chance(luck)
}

/// Roll whether the defender evades the attack
pub fn is_evaded(luck: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(0.0..100.0) < evade_chance(luck)
}

/// Damage dealt by a landed attack. The floor of 1 applies before the
/// multipliers: crit scales by 1.5 (truncated), a defending target then
/// halves the result.
pub fn calculate_damage(attack: u32, defense: u32, is_crit: bool, is_defending: bool) -> u32 {
    let base = attack.saturating_sub(defense).max(1);
    let mut damage = if is_crit {
        (base as f64 * 1.5) as u32
    } else {
        base
    };
    if is_defending {
        damage = (damage as f64 * 0.5) as u32;
    }
    damage
}
