//! Attribute detectors: attack rolls and ability modifiers.

use crate::vocab::Ability;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MODIFIER_LONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)modificateur\s+(?:de\s+|d['’]\s*)(force|dextérité|dexterite|constitution|intelligence|sagesse|charisme)\b",
    )
    .expect("valid regex")
});

static MODIFIER_SHORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+\s*(FOR|DEX|CON|INT|SAG|CHA)\b").expect("valid regex")
});

static ATTACK_ROLL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)jet\s+d['’]\s*attaque|attaque\s+de\s+sort").expect("valid regex")
});

/// Whether an ability modifier adds to a spell's damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModifierInfo {
    pub has_modifier: bool,
    pub ability: Option<Ability>,
}

impl ModifierInfo {
    pub fn none() -> Self {
        Self::default()
    }

    fn of(ability: Ability) -> Self {
        Self {
            has_modifier: true,
            ability: Some(ability),
        }
    }
}

/// "modificateur de Sagesse" anywhere in the text.
fn match_long_form(text: &str) -> Option<Ability> {
    let caps = MODIFIER_LONG_RE.captures(text)?;
    Ability::from_name(&caps[1])
}

/// "+ CHA" style shorthand.
fn match_short_form(text: &str) -> Option<Ability> {
    let caps = MODIFIER_SHORT_RE.captures(text)?;
    Ability::from_abbreviation(&caps[1])
}

/// Find the ability modifier a description adds to its damage.
///
/// The long form is tried first and wins outright; the shorthand is only a
/// fallback.
pub fn detect_modifier(text: &str) -> ModifierInfo {
    match_long_form(text)
        .or_else(|| match_short_form(text))
        .map_or_else(ModifierInfo::none, ModifierInfo::of)
}

/// Does the description call for a spell attack roll?
pub fn is_attack_roll(text: &str) -> bool {
    ATTACK_ROLL_RE.is_match(text)
}
