//! End-to-end checks of the analyzer against typical spell wording.
//!
//! Run with: `cargo test -p grimoire-core --test scenarios`

use grimoire_core::{
    analyze_spell_damage, available_cast_levels, calculate_cantrip_damage, calculate_slot_damage,
    detect_modifier, extract_damage_components, parse_cantrip_upgrade, Ability, DamageComponent,
    DamageType, SpellDamageInfo, UpgradeType,
};

const FIRE_DESCRIPTION: &str = "Vous infligez 2d6 dégâts de feu.";

// =============================================================================
// MODEL INVARIANTS
// =============================================================================

#[test]
fn test_extraction_is_idempotent() {
    let text = "La cible subit 3d8 dégâts de foudre puis 1d6 dégâts de tonnerre (2d6 si elle est mouillée).";
    let first = extract_damage_components(text);
    let second = extract_damage_components(text);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_formula_matches_counts() {
    let info = analyze_spell_damage(
        "Chaque créature subit 4d6 dégâts de feu et 4d6 dégâts radiants.",
        Some("+1d6 par niveau d'emplacement"),
        5,
    );
    for c in info.base_damage.iter().chain(info.upgrade_pattern().unwrap_or_default()) {
        assert_eq!(c.formula(), format!("{}d{}", c.dice_count, c.dice_type));
    }
}

fn assert_exclusive(info: &SpellDamageInfo) {
    match info.upgrade_type() {
        UpgradeType::PerSlotLevel => {
            assert!(info.upgrade_per_levels().is_some());
            assert!(info.character_level_thresholds().is_none());
        }
        UpgradeType::CharacterLevel => {
            assert!(info.character_level_thresholds().is_some());
            assert!(info.upgrade_per_levels().is_none());
        }
        UpgradeType::None => {
            assert!(info.upgrade_pattern().is_none());
            assert!(info.upgrade_per_levels().is_none());
            assert!(info.character_level_thresholds().is_none());
        }
    }
}

#[test]
fn test_upgrade_modes_are_exclusive() {
    let texts = [
        "+1d6 par niveau d'emplacement",
        "Les dégâts augmentent de 1d6 aux niveaux 5, 11 et 17.",
        "Rien de particulier.",
    ];
    for level in [0, 1, 3] {
        for text in texts {
            assert_exclusive(&analyze_spell_damage(FIRE_DESCRIPTION, Some(text), level));
        }
    }
}

#[test]
fn test_repeated_compilation_is_stable() {
    let info = analyze_spell_damage(
        FIRE_DESCRIPTION,
        Some("+1d6 par niveau d'emplacement supérieur à 3"),
        3,
    );
    let snapshot = info.clone();
    let outputs: Vec<String> = (0..3)
        .map(|_| calculate_slot_damage(&info, 3, 6, Some(2)))
        .collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(info, snapshot);
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_cast_level_range() {
    assert_eq!(available_cast_levels(3, 9, true), vec![3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(available_cast_levels(0, 9, false), vec![0]);
}

#[test]
fn test_simple_leveled_spell() {
    let info = analyze_spell_damage(FIRE_DESCRIPTION, None, 3);
    assert_eq!(
        info.base_damage,
        vec![DamageComponent::new(2, 6).with_damage_type(DamageType::Feu)]
    );
    assert_eq!(info.upgrade_type(), UpgradeType::None);

    let json = serde_json::to_value(&info.base_damage[0]).unwrap();
    assert_eq!(json["dice_count"], 2);
    assert_eq!(json["dice_type"], 6);
    assert_eq!(json["formula"], "2d6");
    assert_eq!(json["damage_type"], "feu");
}

#[test]
fn test_slot_scaling() {
    let info = analyze_spell_damage(
        FIRE_DESCRIPTION,
        Some("+1d6 par niveau d'emplacement supérieur à 3"),
        3,
    );
    assert_eq!(calculate_slot_damage(&info, 3, 5, None), "4d6 feu");
}

#[test]
fn test_cantrip_scaling() {
    let info = analyze_spell_damage(
        "La cible subit 1d10 dégâts de feu.",
        Some("Les dégâts augmentent de 1d10 lorsque vous atteignez les niveaux 5, 11 et 17."),
        0,
    );
    assert_eq!(calculate_cantrip_damage(&info, 11, None), "3d10 feu");
    assert_eq!(calculate_cantrip_damage(&info, 10, None), "2d10 feu");
}

#[test]
fn test_modifier_attachment() {
    let text = "La cible subit 1d10 + CHA dégâts de force.";
    let modifier = detect_modifier(text);
    assert!(modifier.has_modifier);
    assert_eq!(modifier.ability, Some(Ability::Charisma));
    assert_eq!(modifier.ability.map(|a| a.name()), Some("Charisme"));

    let info = analyze_spell_damage(text, None, 0);
    let damage = calculate_cantrip_damage(&info, 1, Some(3));
    assert!(damage.ends_with(" +3"), "{damage}");
}

#[test]
fn test_parenthetical_dice_do_not_become_increment() {
    let text = "Au niveau 5 (2d6), au niveau 11 (3d6) et au niveau 17 (4d6), \
                les dégâts augmentent de 1d6.";
    let upgrade = parse_cantrip_upgrade(text).unwrap();
    assert_eq!(upgrade.pattern, vec![DamageComponent::new(1, 6)]);
    assert_eq!(upgrade.thresholds, vec![5, 11, 17]);
}

#[test]
fn test_parenthetical_fallback_only_without_phrase() {
    let text = "(2d6 sous forme bestiale) Ajoutez 1d4 aux niveaux 5 et 11.";
    let upgrade = parse_cantrip_upgrade(text).unwrap();
    assert_eq!(upgrade.pattern, vec![DamageComponent::new(1, 4)]);
}

#[test]
fn test_mixed_types_scale_the_matching_term() {
    let info = analyze_spell_damage(
        "Chaque créature subit 4d6 dégâts de feu et 4d6 dégâts radiants.",
        Some("Les dégâts augmentent de 1d6 dégâts radiants pour chaque niveau d'emplacement au-delà du 5."),
        5,
    );
    assert_eq!(calculate_slot_damage(&info, 5, 7, None), "4d6 feu + 6d6 radiant");
}

#[test]
fn test_dice_between_levels_do_not_add_thresholds() {
    let info = analyze_spell_damage(
        "La cible subit 1d6 dégâts de poison.",
        Some("Ce sort inflige 1d6 de plus au niveau 5, 2d6 de plus au niveau 11 et 3d6 de plus au niveau 17."),
        0,
    );
    assert_eq!(info.character_level_thresholds(), Some(&[5u8, 11, 17][..]));
    assert_eq!(calculate_cantrip_damage(&info, 3, None), "1d6 poison");
    assert_eq!(calculate_cantrip_damage(&info, 5, None), "2d6 poison");
    assert_eq!(calculate_cantrip_damage(&info, 17, None), "4d6 poison");
}
