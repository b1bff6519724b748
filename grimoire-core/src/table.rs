//! Damage tables: a spell's damage at every level a caster can use it.

use crate::analyzer::SpellDamageInfo;
use crate::compile::{
    available_cast_levels, compile_cantrip_damage, compile_slot_damage, CompiledDamage,
    MAX_SPELL_LEVEL,
};
use serde::{Deserialize, Serialize};

/// Character levels at which cantrips usually change.
pub const CANTRIP_TIERS: [u8; 4] = [1, 5, 11, 17];

/// Options for [`damage_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Highest slot level the caster has.
    pub max_spell_level: u8,
    /// Ability modifier added when the spell uses one.
    pub ability_modifier: Option<i32>,
    /// Character levels listed for cantrips.
    pub character_levels: Vec<u8>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_spell_level: MAX_SPELL_LEVEL,
            ability_modifier: None,
            character_levels: CANTRIP_TIERS.to_vec(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caster's best slot level.
    pub fn with_max_spell_level(mut self, level: u8) -> Self {
        self.max_spell_level = level;
        self
    }

    /// Set the ability modifier.
    pub fn with_ability_modifier(mut self, modifier: i32) -> Self {
        self.ability_modifier = Some(modifier);
        self
    }

    /// Set the character levels listed for cantrips.
    pub fn with_character_levels(mut self, levels: impl IntoIterator<Item = u8>) -> Self {
        self.character_levels = levels.into_iter().collect();
        self
    }
}

/// One line of a damage table. `level` is a slot level for leveled spells
/// and a character level for cantrips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRow {
    pub level: u8,
    pub damage: CompiledDamage,
}

pub fn damage_table(info: &SpellDamageInfo, spell_level: u8, config: &TableConfig) -> Vec<DamageRow> {
    if !info.is_damage_spell {
        return Vec::new();
    }

    if spell_level == 0 {
        return config
            .character_levels
            .iter()
            .map(|&level| DamageRow {
                level,
                damage: compile_cantrip_damage(info, level, config.ability_modifier),
            })
            .collect();
    }

    available_cast_levels(spell_level, config.max_spell_level, info.has_upgrade())
        .into_iter()
        .map(|level| DamageRow {
            level,
            damage: compile_slot_damage(info, spell_level, level, config.ability_modifier),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_spell_damage;

    #[test]
    fn test_leveled_table() {
        let info = analyze_spell_damage(
            "Chaque créature subit 8d6 dégâts de feu.",
            Some("+1d6 par niveau d'emplacement au-delà du 3"),
            3,
        );
        let rows = damage_table(&info, 3, &TableConfig::new().with_max_spell_level(5));
        let rendered: Vec<(u8, String)> =
            rows.iter().map(|r| (r.level, r.damage.to_string())).collect();
        assert_eq!(
            rendered,
            vec![
                (3, "8d6 feu".to_string()),
                (4, "9d6 feu".to_string()),
                (5, "10d6 feu".to_string()),
            ]
        );
    }

    #[test]
    fn test_cantrip_table() {
        let info = analyze_spell_damage(
            "La cible subit 1d8 dégâts de froid.",
            Some("Les dégâts augmentent de 1d8 aux niveaux 5, 11 et 17."),
            0,
        );
        let rows = damage_table(&info, 0, &TableConfig::default());
        let rendered: Vec<String> = rows.iter().map(|r| r.damage.to_string()).collect();
        assert_eq!(rendered, vec!["1d8 froid", "2d8 froid", "3d8 froid", "4d8 froid"]);
    }

    #[test]
    fn test_table_without_scaling_has_one_row() {
        let info = analyze_spell_damage("La cible subit 3d8 dégâts de tonnerre.", None, 2);
        let rows = damage_table(&info, 2, &TableConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, 2);
    }

    #[test]
    fn test_table_for_non_damage_spell_is_empty() {
        let info = analyze_spell_damage("Vous devenez invisible.", None, 2);
        assert!(damage_table(&info, 2, &TableConfig::default()).is_empty());
    }
}
