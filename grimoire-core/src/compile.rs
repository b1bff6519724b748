//! Turning a [`SpellDamageInfo`] into the damage of a concrete cast.

use crate::analyzer::{SpellDamageInfo, Upgrade};
use crate::dice::{DamageComponent, MergeKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Highest spell slot level.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Damage of one cast: dice terms plus an optional flat modifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompiledDamage {
    pub components: Vec<DamageComponent>,
    pub modifier: Option<i32>,
}

impl CompiledDamage {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Expected total, modifier included.
    pub fn average(&self) -> f64 {
        let dice: f64 = self.components.iter().map(DamageComponent::average).sum();
        dice + self.modifier.unwrap_or(0) as f64
    }
}

impl fmt::Display for CompiledDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return Ok(());
        }
        let terms: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", terms.join(" + "))?;
        match self.modifier {
            Some(m) if m >= 0 => write!(f, " +{m}"),
            Some(m) => write!(f, " {m}"),
            None => Ok(()),
        }
    }
}

/// Fold `multiplier` copies of each increment into a fresh copy of `base`.
///
/// An increment joins the first term with the same die size and damage
/// type; otherwise it becomes a new term at the end.
fn merge_increments(
    base: &[DamageComponent],
    pattern: &[DamageComponent],
    multiplier: u32,
) -> Vec<DamageComponent> {
    let mut merged: Vec<DamageComponent> = base.to_vec();
    if multiplier == 0 {
        return merged;
    }

    let mut index: HashMap<MergeKey, usize> = HashMap::new();
    for (i, c) in merged.iter().enumerate() {
        index.entry(c.key()).or_insert(i);
    }

    for increment in pattern.iter().map(|p| p.scaled(multiplier)) {
        let key = increment.key();
        if let Some(&i) = index.get(&key) {
            merged[i].dice_count = merged[i].dice_count.saturating_add(increment.dice_count);
        } else {
            index.insert(key, merged.len());
            merged.push(increment);
        }
    }
    merged
}

fn finish(
    info: &SpellDamageInfo,
    components: Vec<DamageComponent>,
    ability_modifier: Option<i32>,
) -> CompiledDamage {
    CompiledDamage {
        components,
        modifier: ability_modifier.filter(|_| info.has_modifier),
    }
}

/// Damage of a leveled spell cast with a `cast_level` slot.
pub fn compile_slot_damage(
    info: &SpellDamageInfo,
    base_spell_level: u8,
    cast_level: u8,
    ability_modifier: Option<i32>,
) -> CompiledDamage {
    if !info.is_damage_spell {
        return CompiledDamage::default();
    }

    let multiplier = match &info.upgrade {
        Upgrade::PerSlotLevel { per_levels, .. } if cast_level > base_spell_level => {
            u32::from(cast_level - base_spell_level) / u32::from((*per_levels).max(1))
        }
        _ => 0,
    };
    let pattern = info.upgrade_pattern().unwrap_or_default();

    finish(
        info,
        merge_increments(&info.base_damage, pattern, multiplier),
        ability_modifier,
    )
}

/// Display string for [`compile_slot_damage`]; empty for non-damage spells.
pub fn calculate_slot_damage(
    info: &SpellDamageInfo,
    base_spell_level: u8,
    cast_level: u8,
    ability_modifier: Option<i32>,
) -> String {
    compile_slot_damage(info, base_spell_level, cast_level, ability_modifier).to_string()
}

/// Damage of a cantrip cast by a character of `character_level`.
///
/// Every threshold at or below the level adds one increment.
pub fn compile_cantrip_damage(
    info: &SpellDamageInfo,
    character_level: u8,
    ability_modifier: Option<i32>,
) -> CompiledDamage {
    if !info.is_damage_spell {
        return CompiledDamage::default();
    }

    let multiplier = match &info.upgrade {
        Upgrade::CharacterLevel { thresholds, .. } => {
            thresholds.iter().filter(|&&t| t <= character_level).count() as u32
        }
        _ => 0,
    };
    let pattern = info.upgrade_pattern().unwrap_or_default();

    finish(
        info,
        merge_increments(&info.base_damage, pattern, multiplier),
        ability_modifier,
    )
}

/// Display string for [`compile_cantrip_damage`]; empty for non-damage spells.
pub fn calculate_cantrip_damage(
    info: &SpellDamageInfo,
    character_level: u8,
    ability_modifier: Option<i32>,
) -> String {
    compile_cantrip_damage(info, character_level, ability_modifier).to_string()
}

/// Slot levels a spell can be cast at.
///
/// Cantrips and spells that do not scale only offer their own level.
/// Otherwise every level from the spell's up to the caster's best slot,
/// never past 9.
pub fn available_cast_levels(spell_level: u8, max_player_spell_level: u8, has_upgrade: bool) -> Vec<u8> {
    if spell_level == 0 || !has_upgrade {
        return vec![spell_level];
    }
    let ceiling = max_player_spell_level.min(MAX_SPELL_LEVEL);
    if ceiling < spell_level {
        return vec![spell_level];
    }
    (spell_level..=ceiling).collect()
}
