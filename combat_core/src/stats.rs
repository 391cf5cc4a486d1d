//! Combatant stats and the stat aggregation pipeline

use content_core::{ContentCatalog, ModifierSet, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Effective combat stats. hp and mana are kept inside [0, max] by the
/// mutating helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub agility: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub luck: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            hp: 100,
            max_hp: 100,
            attack: 10,
            defense: 10,
            magic: 10,
            agility: 10,
            mana: 50,
            max_mana: 50,
            luck: 0,
        }
    }
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::MaxHp => self.max_hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Magic => self.magic,
            StatKind::Agility => self.agility,
            StatKind::Mana => self.mana,
            StatKind::MaxMana => self.max_mana,
            StatKind::Luck => self.luck,
        }
    }

    /// Add a signed delta to one stat, saturating at zero
    pub fn apply_delta(&mut self, kind: StatKind, delta: i32) {
        let slot = match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Magic => &mut self.magic,
            StatKind::Agility => &mut self.agility,
            StatKind::Mana => &mut self.mana,
            StatKind::MaxMana => &mut self.max_mana,
            StatKind::Luck => &mut self.luck,
        };
        if delta >= 0 {
            *slot = slot.saturating_add(delta as u32);
        } else {
            *slot = slot.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Re-clamp hp and mana after max values changed
    pub fn clamp_resources(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.mana = self.mana.min(self.max_mana);
    }
}

/// Per-stat equipment deltas, reported alongside the totals
pub type BonusBreakdown = BTreeMap<StatKind, i32>;

/// Merge equipment bonuses into base stats.
///
/// Returns the effective stats and a per-stat delta map. Equipped item ids
/// the catalog does not know contribute nothing and never fail the call.
pub fn total_stats(
    base: &Stats,
    equipment: &BTreeMap<String, String>,
    catalog: &ContentCatalog,
) -> (Stats, BonusBreakdown) {
    let mut totals = base.clone();
    let mut breakdown: BonusBreakdown = StatKind::all().iter().map(|k| (*k, 0)).collect();

    for item_id in equipment.values() {
        let Some(item) = catalog.item(item_id) else {
            tracing::warn!("equipped item '{item_id}' not found in catalog");
            continue;
        };
        for (kind, value) in &item.stats {
            totals.apply_delta(*kind, *value);
            *breakdown.entry(*kind).or_insert(0) += value;
        }
    }

    totals.clamp_resources();
    (totals, breakdown)
}

/// Merge race and class modifiers onto base stats. Both sets are added
/// independently; addition is commutative so the order does not matter.
pub fn apply_modifiers(base: &Stats, race: &ModifierSet, class: &ModifierSet) -> Stats {
    let mut stats = base.clone();
    for (kind, value) in race.modifiers.iter().chain(class.modifiers.iter()) {
        stats.apply_delta(*kind, *value);
    }
    stats.clamp_resources();
    stats
}
