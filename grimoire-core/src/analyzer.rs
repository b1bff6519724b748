//! Spell damage analysis.
//!
//! [`analyze_spell_damage`] turns a description and its optional "at higher
//! levels" text into a [`SpellDamageInfo`]: the base dice, whether an attack
//! roll or an ability modifier is involved, and how the damage scales.

use crate::detect::{detect_modifier, is_attack_roll};
use crate::dice::{extract_damage_components, DamageComponent};
use crate::scaling::{parse_cantrip_upgrade, parse_slot_upgrade};
use crate::vocab::Ability;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scaling mode of a spell, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeType {
    None,
    PerSlotLevel,
    CharacterLevel,
}

/// How a spell's damage grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "upgrade_type", rename_all = "snake_case")]
pub enum Upgrade {
    /// No scaling.
    #[default]
    None,
    /// One `pattern` per `per_levels` slot levels above the spell's level.
    PerSlotLevel {
        pattern: Vec<DamageComponent>,
        per_levels: u8,
    },
    /// One `pattern` per threshold the caster's level has reached.
    CharacterLevel {
        pattern: Vec<DamageComponent>,
        thresholds: Vec<u8>,
    },
}

/// Parsed damage model of one spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDamageInfo {
    pub is_damage_spell: bool,
    pub is_attack_roll: bool,
    pub base_damage: Vec<DamageComponent>,
    pub has_modifier: bool,
    pub modifier_ability: Option<Ability>,
    pub upgrade: Upgrade,
}

impl SpellDamageInfo {
    pub fn upgrade_type(&self) -> UpgradeType {
        match self.upgrade {
            Upgrade::None => UpgradeType::None,
            Upgrade::PerSlotLevel { .. } => UpgradeType::PerSlotLevel,
            Upgrade::CharacterLevel { .. } => UpgradeType::CharacterLevel,
        }
    }

    pub fn has_upgrade(&self) -> bool {
        self.upgrade != Upgrade::None
    }

    /// Dice added per scaling step, if the spell scales.
    pub fn upgrade_pattern(&self) -> Option<&[DamageComponent]> {
        match &self.upgrade {
            Upgrade::None => None,
            Upgrade::PerSlotLevel { pattern, .. } | Upgrade::CharacterLevel { pattern, .. } => {
                Some(pattern.as_slice())
            }
        }
    }

    pub fn upgrade_per_levels(&self) -> Option<u8> {
        match self.upgrade {
            Upgrade::PerSlotLevel { per_levels, .. } => Some(per_levels),
            _ => None,
        }
    }

    pub fn character_level_thresholds(&self) -> Option<&[u8]> {
        match &self.upgrade {
            Upgrade::CharacterLevel { thresholds, .. } => Some(thresholds.as_slice()),
            _ => None,
        }
    }
}

/// Give untyped increments the type of the base term rolling the same die.
///
/// "+1d6 par niveau" talks about the spell's own 1d6 fire damage even though
/// the sentence never says "feu" again.
fn resolve_increment_types(
    base: &[DamageComponent],
    pattern: Vec<DamageComponent>,
) -> Vec<DamageComponent> {
    pattern
        .into_iter()
        .map(|mut inc| {
            if inc.damage_type.is_none() {
                inc.damage_type = base
                    .iter()
                    .find(|b| b.dice_type == inc.dice_type)
                    .and_then(|b| b.damage_type);
            }
            inc
        })
        .collect()
}

/// Analyze a spell's damage.
///
/// `spell_level` 0 marks a cantrip: its `higher_levels` text is read as
/// character-level scaling, otherwise as slot scaling. Only one of the two
/// parsers ever runs, and a text it does not understand simply leaves the
/// spell without scaling.
pub fn analyze_spell_damage(
    description: &str,
    higher_levels: Option<&str>,
    spell_level: u8,
) -> SpellDamageInfo {
    let base_damage = extract_damage_components(description);
    let attack = is_attack_roll(description);
    let modifier = detect_modifier(description);
    let is_cantrip = spell_level == 0;

    let upgrade = match higher_levels {
        Some(text) if is_cantrip => parse_cantrip_upgrade(text)
            .map(|up| Upgrade::CharacterLevel {
                pattern: resolve_increment_types(&base_damage, up.pattern),
                thresholds: up.thresholds,
            })
            .unwrap_or_default(),
        Some(text) => parse_slot_upgrade(text)
            .map(|up| Upgrade::PerSlotLevel {
                pattern: resolve_increment_types(&base_damage, up.pattern),
                per_levels: up.per_levels,
            })
            .unwrap_or_default(),
        None => Upgrade::None,
    };

    debug!(
        spell_level,
        components = base_damage.len(),
        attack,
        modifier = ?modifier.ability,
        upgrade = %upgrade_kind(&upgrade),
        "analyzed spell damage"
    );

    SpellDamageInfo {
        is_damage_spell: !base_damage.is_empty(),
        is_attack_roll: attack,
        base_damage,
        has_modifier: modifier.has_modifier,
        modifier_ability: modifier.ability,
        upgrade,
    }
}

fn upgrade_kind(upgrade: &Upgrade) -> &'static str {
    match upgrade {
        Upgrade::None => "none",
        Upgrade::PerSlotLevel { .. } => "per_slot_level",
        Upgrade::CharacterLevel { .. } => "character_level",
    }
}
