//! Command line configuration.

use std::path::PathBuf;

/// Environment variable naming a default catalog file.
pub const CATALOG_ENV: &str = "GRIMOIRE_CATALOG";

/// Options for one run of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Spell to analyze.
    pub spell: Option<String>,
    /// JSON catalog to read spells from instead of the bundled list.
    pub catalog: Option<PathBuf>,
    /// Caster's character level, for cantrips.
    pub character_level: u8,
    /// Caster's best spell slot.
    pub max_slot: u8,
    /// Slot used when rolling a leveled spell. Defaults to the spell's level.
    pub cast_level: Option<u8>,
    /// Ability modifier added to spells that use one.
    pub modifier: Option<i32>,
    /// Roll the damage once.
    pub roll: bool,
    /// List the available spells instead.
    pub list: bool,
    /// Print the analysis as JSON.
    pub json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            spell: None,
            catalog: None,
            character_level: 1,
            max_slot: 9,
            cast_level: None,
            modifier: None,
            roll: false,
            list: false,
            json: false,
        }
    }
}

impl CliConfig {
    /// Apply environment defaults that flags did not override.
    pub fn with_env_defaults(mut self) -> Self {
        if self.catalog.is_none() {
            self.catalog = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
        }
        self
    }
}

/// Parse command line arguments. Unknown flags and unparsable values are
/// ignored, leaving the default.
pub fn parse_config_from_args(args: &[String]) -> CliConfig {
    let mut config = CliConfig::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--spell" | "-s" => {
                if let Some(name) = args.get(i + 1) {
                    config.spell = Some(name.clone());
                    i += 1;
                }
            }
            "--catalog" => {
                if let Some(path) = args.get(i + 1) {
                    config.catalog = Some(PathBuf::from(path));
                    i += 1;
                }
            }
            "--character-level" => {
                if let Some(level) = args.get(i + 1) {
                    config.character_level = level.parse().unwrap_or(config.character_level);
                    i += 1;
                }
            }
            "--max-slot" => {
                if let Some(level) = args.get(i + 1) {
                    config.max_slot = level.parse().unwrap_or(config.max_slot);
                    i += 1;
                }
            }
            "--cast-level" => {
                if let Some(level) = args.get(i + 1) {
                    config.cast_level = level.parse().ok();
                    i += 1;
                }
            }
            "--modifier" => {
                if let Some(value) = args.get(i + 1) {
                    config.modifier = value.parse().ok();
                    i += 1;
                }
            }
            "--roll" => config.roll = true,
            "--list" => config.list = true,
            "--json" => config.json = true,
            _ => {}
        }
        i += 1;
    }

    config
}
