//! Bundled spell list.
//!
//! A handful of French spell texts, enough to try the analyzer without a
//! catalog file and to exercise it against realistic wording.

use crate::analyzer::{analyze_spell_damage, SpellDamageInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A spell as the character sheet stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEntry {
    pub name: String,
    pub level: u8, // 0 for cantrips
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub higher_levels: Option<String>,
}

impl SpellEntry {
    pub fn new(name: impl Into<String>, level: u8, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            description: description.into(),
            higher_levels: None,
        }
    }

    pub fn with_higher_levels(mut self, text: impl Into<String>) -> Self {
        self.higher_levels = Some(text.into());
        self
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn analyze(&self) -> SpellDamageInfo {
        analyze_spell_damage(&self.description, self.higher_levels.as_deref(), self.level)
    }
}

// ============================================================================
// Spell Database
// ============================================================================

static SPELL_DATABASE: LazyLock<HashMap<String, SpellEntry>> = LazyLock::new(build_spell_database);

/// Look up a spell by name (case-insensitive).
pub fn get_spell(name: &str) -> Option<&'static SpellEntry> {
    SPELL_DATABASE.get(&name.to_lowercase())
}

/// Get all spells in the database.
pub fn all_spells() -> impl Iterator<Item = &'static SpellEntry> {
    SPELL_DATABASE.values()
}

/// Get all spells of a specific level.
pub fn spells_by_level(level: u8) -> impl Iterator<Item = &'static SpellEntry> {
    SPELL_DATABASE.values().filter(move |s| s.level == level)
}

fn build_spell_database() -> HashMap<String, SpellEntry> {
    let spells = [
        // ====================================================================
        // CANTRIPS (Level 0)
        // ====================================================================
        SpellEntry::new(
            "Trait de feu",
            0,
            "Vous lancez une étincelle de feu sur une créature ou un objet à portée. \
             Effectuez une attaque de sort à distance contre la cible. En cas de réussite, \
             la cible subit 1d10 dégâts de feu.",
        )
        .with_higher_levels(
            "Les dégâts de ce sort augmentent de 1d10 lorsque vous atteignez le niveau 5 (2d10), \
             le niveau 11 (3d10) et le niveau 17 (4d10).",
        ),
        SpellEntry::new(
            "Rayon de givre",
            0,
            "Un rayon glacial frappe une créature à portée. Effectuez une attaque de sort à \
             distance. En cas de réussite, elle subit 1d8 dégâts de froid et sa vitesse est \
             réduite de 3 mètres jusqu'au début de votre prochain tour.",
        )
        .with_higher_levels("Les dégâts augmentent de 1d8 aux niveaux 5, 11 et 17."),
        SpellEntry::new(
            "Flamme sacrée",
            0,
            "Une lueur semblable à une flamme descend sur une créature visible à portée. \
             La cible doit réussir un jet de sauvegarde de Dextérité ou subir 1d8 dégâts radiants.",
        )
        .with_higher_levels("Les dégâts augmentent de 1d8 au niveau 5 (2d8), 11 (3d8) et 17 (4d8)."),
        SpellEntry::new(
            "Décharge occulte",
            0,
            "Un rayon d'énergie crépitante file vers une créature à portée. Effectuez une \
             attaque de sort à distance. En cas de réussite, la cible subit 1d10 + CHA dégâts de force.",
        )
        .with_higher_levels(
            "Le sort crée un rayon supplémentaire aux niveaux 5, 11 et 17.",
        ),
        SpellEntry::new(
            "Lumière",
            0,
            "Vous touchez un objet qui émet une lumière vive dans un rayon de 6 mètres.",
        ),
        // ====================================================================
        // LEVELED SPELLS
        // ====================================================================
        SpellEntry::new(
            "Projectile magique",
            1,
            "Vous créez trois fléchettes de force magique. Chacune inflige 1d4 + 1 dégâts de \
             force à une cible de votre choix.",
        )
        .with_higher_levels(
            "Le sort crée une fléchette supplémentaire pour chaque niveau d'emplacement au-delà du 1.",
        ),
        SpellEntry::new(
            "Mains brûlantes",
            1,
            "Chaque créature dans un cône de 4,5 mètres doit faire un jet de sauvegarde de \
             Dextérité. Elle subit 3d6 dégâts de feu en cas d'échec, ou la moitié en cas de réussite.",
        )
        .with_higher_levels("+1d6 par niveau d'emplacement supérieur à 1"),
        SpellEntry::new(
            "Soins",
            1,
            "Une créature que vous touchez récupère 1d8 + votre modificateur de Sagesse points de vie.",
        )
        .with_higher_levels("+1d8 par niveau d'emplacement supérieur à 1"),
        SpellEntry::new(
            "Rayon ardent",
            2,
            "Vous créez trois rayons de feu. Effectuez un jet d'attaque de sort à distance pour \
             chacun. En cas de réussite, la cible subit 2d6 dégâts de feu.",
        ),
        SpellEntry::new(
            "Boule de feu",
            3,
            "Une traînée lumineuse explose en une gerbe de flammes. Chaque créature dans une \
             sphère de 6 mètres de rayon doit faire un jet de sauvegarde de Dextérité. Elle subit \
             8d6 dégâts de feu en cas d'échec, ou la moitié en cas de réussite.",
        )
        .with_higher_levels(
            "Lorsque vous lancez ce sort avec un emplacement de niveau 4 ou supérieur, les dégâts \
             augmentent de 1d6 pour chaque niveau d'emplacement au-delà du 3.",
        ),
        SpellEntry::new(
            "Colonne de flamme",
            5,
            "Une colonne de feu divin s'abat. Chaque créature dans la zone subit 4d6 dégâts de \
             feu et 4d6 dégâts radiants en cas d'échec.",
        )
        .with_higher_levels(
            "Les dégâts de feu ou les dégâts radiants, au choix, augmentent de 1d6 pour chaque \
             niveau d'emplacement au-delà du 5.",
        ),
    ];

    spells
        .into_iter()
        .map(|s| (s.name.to_lowercase(), s))
        .collect()
}
