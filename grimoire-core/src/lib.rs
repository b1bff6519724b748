//! Damage analysis for French D&D 5e spell descriptions.
//!
//! This crate provides:
//! - Extraction of dice damage terms and damage types from spell text
//! - Detection of attack rolls and ability modifiers
//! - Parsing of slot-level and character-level damage scaling
//! - Damage formulas for any cast level or character level, and rolling them
//!
//! # Quick Start
//!
//! ```
//! use grimoire_core::{analyze_spell_damage, calculate_slot_damage};
//!
//! let info = analyze_spell_damage(
//!     "Vous infligez 2d6 dégâts de feu.",
//!     Some("+1d6 par niveau d'emplacement supérieur à 3"),
//!     3,
//! );
//! assert_eq!(calculate_slot_damage(&info, 3, 5, None), "4d6 feu");
//! ```

pub mod analyzer;
pub mod catalog;
pub mod compile;
pub mod detect;
pub mod dice;
pub mod roll;
pub mod scaling;
pub mod spells;
pub mod table;
pub mod vocab;

// Primary public API
pub use analyzer::{analyze_spell_damage, SpellDamageInfo, Upgrade, UpgradeType};
pub use catalog::{Catalog, CatalogError};
pub use compile::{
    available_cast_levels, calculate_cantrip_damage, calculate_slot_damage,
    compile_cantrip_damage, compile_slot_damage, CompiledDamage, MAX_SPELL_LEVEL,
};
pub use detect::{detect_modifier, is_attack_roll, ModifierInfo};
pub use dice::{extract_damage_components, DamageComponent, DiceError};
pub use roll::{DamageRoll, RollError, RolledComponent, MAX_ROLLED_DICE};
pub use scaling::{parse_cantrip_upgrade, parse_slot_upgrade, CantripUpgrade, SlotUpgrade};
pub use spells::SpellEntry;
pub use table::{damage_table, DamageRow, TableConfig};
pub use vocab::{Ability, DamageType};
