//! Closed vocabularies recognized in French spell text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage types as they are written in French spell descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Acide,
    Contondant,
    Feu,
    Force,
    Foudre,
    Froid,
    #[serde(rename = "nécrotique")]
    Necrotique,
    Perforant,
    Poison,
    Psychique,
    Radiant,
    Tonnerre,
    Tranchant,
}

impl DamageType {
    /// Canonical word used when displaying a formula.
    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Acide => "acide",
            DamageType::Contondant => "contondant",
            DamageType::Feu => "feu",
            DamageType::Force => "force",
            DamageType::Foudre => "foudre",
            DamageType::Froid => "froid",
            DamageType::Necrotique => "nécrotique",
            DamageType::Perforant => "perforant",
            DamageType::Poison => "poison",
            DamageType::Psychique => "psychique",
            DamageType::Radiant => "radiant",
            DamageType::Tonnerre => "tonnerre",
            DamageType::Tranchant => "tranchant",
        }
    }

    /// Recognize a single word, ignoring case and the plural or feminine
    /// endings adjectives take ("dégâts nécrotiques", "lame tranchante").
    pub fn from_word(word: &str) -> Option<DamageType> {
        let lower = word.to_lowercase();
        let stem = lower
            .strip_suffix("es")
            .or_else(|| lower.strip_suffix('s'))
            .or_else(|| lower.strip_suffix('e'))
            .unwrap_or(&lower);

        DamageType::all().into_iter().find(|t| {
            let label = t.label();
            lower == label || stem == label || stem == label.trim_end_matches('e')
        })
    }

    pub fn all() -> [DamageType; 13] {
        [
            DamageType::Acide,
            DamageType::Contondant,
            DamageType::Feu,
            DamageType::Force,
            DamageType::Foudre,
            DamageType::Froid,
            DamageType::Necrotique,
            DamageType::Perforant,
            DamageType::Poison,
            DamageType::Psychique,
            DamageType::Radiant,
            DamageType::Tonnerre,
            DamageType::Tranchant,
        ]
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "FOR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "SAG",
            Ability::Charisma => "CHA",
        }
    }

    /// French name, as it appears in "modificateur de Sagesse".
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Force",
            Ability::Dexterity => "Dextérité",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Sagesse",
            Ability::Charisma => "Charisme",
        }
    }

    pub fn from_name(name: &str) -> Option<Ability> {
        let lower = name.to_lowercase();
        if lower == "dexterite" {
            return Some(Ability::Dexterity);
        }
        Ability::all()
            .into_iter()
            .find(|a| a.name().to_lowercase() == lower)
    }

    pub fn from_abbreviation(abbr: &str) -> Option<Ability> {
        Ability::all()
            .into_iter()
            .find(|a| a.abbreviation().eq_ignore_ascii_case(abbr))
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
