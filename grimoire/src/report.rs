//! Text output for the viewer.

use grimoire_core::{
    compile_cantrip_damage, compile_slot_damage, damage_table, CompiledDamage, SpellDamageInfo,
    SpellEntry, TableConfig, UpgradeType,
};

use crate::config::CliConfig;

fn yes_no(value: bool) -> &'static str {
    if value {
        "oui"
    } else {
        "non"
    }
}

/// Render the damage card of a spell.
pub fn spell_report(spell: &SpellEntry, info: &SpellDamageInfo, config: &CliConfig) -> String {
    let mut out = Vec::new();

    let level = if spell.is_cantrip() {
        "Tour de magie".to_string()
    } else {
        format!("Niveau {}", spell.level)
    };
    out.push(format!("{} ({})", spell.name, level));

    if !info.is_damage_spell {
        out.push("  Aucun dégât détecté.".to_string());
        return out.join("\n");
    }

    out.push(format!("  Jet d'attaque : {}", yes_no(info.is_attack_roll)));
    if let Some(ability) = info.modifier_ability {
        out.push(format!("  Modificateur  : {} ({})", ability.name(), ability.abbreviation()));
    }
    let scaling = match info.upgrade_type() {
        UpgradeType::None => "aucune".to_string(),
        UpgradeType::PerSlotLevel => format!(
            "par niveau d'emplacement (tous les {})",
            info.upgrade_per_levels().unwrap_or(1)
        ),
        UpgradeType::CharacterLevel => format!(
            "par niveau de personnage ({})",
            info.character_level_thresholds()
                .unwrap_or_default()
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    out.push(format!("  Progression   : {scaling}"));

    let mut table_config = TableConfig::new().with_max_spell_level(config.max_slot);
    if let Some(m) = config.modifier {
        table_config = table_config.with_ability_modifier(m);
    }
    let header = if spell.is_cantrip() {
        "  Niveau de personnage"
    } else {
        "  Niveau d'emplacement"
    };
    out.push(header.to_string());
    for row in damage_table(info, spell.level, &table_config) {
        out.push(format!(
            "    {:>2}  {}  (moy. {:.1})",
            row.level,
            row.damage,
            row.damage.average()
        ));
    }

    out.join("\n")
}

/// The damage to roll for this run's character or slot level.
pub fn damage_to_roll(spell: &SpellEntry, info: &SpellDamageInfo, config: &CliConfig) -> CompiledDamage {
    if spell.is_cantrip() {
        compile_cantrip_damage(info, config.character_level, config.modifier)
    } else {
        let cast_level = config.cast_level.unwrap_or(spell.level);
        compile_slot_damage(info, spell.level, cast_level, config.modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::spells::get_spell;

    #[test]
    fn test_report_lists_every_slot() {
        let spell = get_spell("Boule de feu").unwrap();
        let info = spell.analyze();
        let config = CliConfig {
            max_slot: 5,
            ..CliConfig::default()
        };
        let report = spell_report(spell, &info, &config);
        assert!(report.starts_with("Boule de feu (Niveau 3)"));
        assert!(report.contains("8d6 feu"));
        assert!(report.contains("10d6 feu"));
        assert!(!report.contains("11d6 feu"));
    }

    #[test]
    fn test_report_for_utility_spell() {
        let spell = get_spell("Lumière").unwrap();
        let report = spell_report(spell, &spell.analyze(), &CliConfig::default());
        assert!(report.contains("Aucun dégât"));
    }

    #[test]
    fn test_damage_to_roll_uses_character_level_for_cantrips() {
        let spell = get_spell("Rayon de givre").unwrap();
        let config = CliConfig {
            character_level: 11,
            ..CliConfig::default()
        };
        let damage = damage_to_roll(spell, &spell.analyze(), &config);
        assert_eq!(damage.to_string(), "3d8 froid");
    }

    #[test]
    fn test_damage_to_roll_uses_cast_level() {
        let spell = get_spell("Mains brûlantes").unwrap();
        let config = CliConfig {
            cast_level: Some(3),
            ..CliConfig::default()
        };
        let damage = damage_to_roll(spell, &spell.analyze(), &config);
        assert_eq!(damage.to_string(), "5d6 feu");
    }
}
