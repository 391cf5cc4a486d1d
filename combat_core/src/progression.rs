//! Experience and level progression

use crate::character::Character;

/// Experience threshold to go from `level - 1` to `level`
pub fn exp_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 100;
    }
    (100.0 * ((level - 1) as f64).powf(1.5)) as u64 + 100
}

/// Resolve any pending level-ups on a character whose exp was just raised.
///
/// Loops so one large grant can produce several level-ups. Each level adds
/// 5 stat points and 10 max hp, and heals to full. Returns whether any
/// level-up occurred.
pub fn grant_exp(character: &mut Character) -> bool {
    let mut leveled_up = false;

    while character.exp >= character.exp_to_next {
        leveled_up = true;
        character.exp -= character.exp_to_next;
        character.level += 1;
        character.stat_points += 5;
        character.stats.max_hp += 10;
        character.stats.hp = character.stats.max_hp;
        character.exp_to_next = exp_for_level(character.level + 1);
    }

    leveled_up
}
