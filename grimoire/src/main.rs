//! Grimoire - spell damage viewer for French D&D 5e spells.
//!
//! Prints how much damage a spell deals at each slot or character level,
//! from the bundled spell list or a JSON catalog:
//!
//! ```bash
//! cargo run -p grimoire -- --spell "Boule de feu" --max-slot 5
//! cargo run -p grimoire -- --catalog sorts.json --spell "Trait de feu" --character-level 11 --roll
//! ```

mod config;
mod report;

use grimoire_core::spells::{all_spells, get_spell};
use grimoire_core::{Catalog, CatalogError, RollError, SpellEntry};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{parse_config_from_args, CliConfig};
use report::{damage_to_roll, spell_report};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Unknown spell: {0}")]
    UnknownSpell(String),

    #[error("No spell given (use --spell <NAME> or --list)")]
    MissingSpell,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Roll(#[from] RollError),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grimoire=info,grimoire_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = parse_config_from_args(&args).with_env_defaults();
    run(config).await.map_err(|e| e.into())
}

async fn run(config: CliConfig) -> Result<(), CliError> {
    let catalog = match &config.catalog {
        Some(path) => {
            tracing::info!(path = %path.display(), "using spell catalog");
            Some(Catalog::load(path).await?)
        }
        None => None,
    };

    if config.list {
        let mut spells: Vec<&SpellEntry> = match &catalog {
            Some(c) => c.spells.iter().collect(),
            None => all_spells().collect(),
        };
        spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        for spell in spells {
            println!("{}  {}", spell.level, spell.name);
        }
        return Ok(());
    }

    let name = config.spell.as_deref().ok_or(CliError::MissingSpell)?;
    let spell = match &catalog {
        Some(c) => c.find(name),
        None => get_spell(name),
    }
    .ok_or_else(|| CliError::UnknownSpell(name.to_string()))?;

    let info = spell.analyze();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", spell_report(spell, &info, &config));
    }

    if config.roll {
        let damage = damage_to_roll(spell, &info, &config);
        if damage.is_empty() {
            tracing::warn!(spell = %spell.name, "nothing to roll");
        } else {
            println!();
            let roll = damage.roll()?;
            println!("Jet ({damage}) : {roll}");
        }
    }

    Ok(())
}

fn print_help() {
    println!("Grimoire - dégâts des sorts de D&D 5e");
    println!();
    println!("USAGE:");
    println!("  grimoire [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help                 Show this help message");
    println!("  -s, --spell <NAME>         Spell to analyze");
    println!("  --catalog <PATH>           JSON spell catalog (default: ${})", config::CATALOG_ENV);
    println!("  --list                     List available spells");
    println!("  --character-level <N>      Character level for cantrips (default: 1)");
    println!("  --max-slot <N>             Highest spell slot (default: 9)");
    println!("  --cast-level <N>           Slot level to roll at (default: spell level)");
    println!("  --modifier <N>             Ability modifier");
    println!("  --roll                     Roll the damage once");
    println!("  --json                     Print the analysis as JSON");
    println!();
    println!("ENVIRONMENT:");
    println!("  RUST_LOG                   Log filter (default: grimoire=info,grimoire_core=info)");
}
