//! Analyze every bundled spell and print its damage at a few levels

use grimoire_core::spells::all_spells;
use grimoire_core::{calculate_cantrip_damage, calculate_slot_damage, SpellEntry};

fn main() {
    println!("=== Analyzing bundled spells ===\n");

    let mut spells: Vec<&SpellEntry> = all_spells().collect();
    spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));

    for spell in spells {
        let info = spell.analyze();
        print!("{} (niveau {})... ", spell.name, spell.level);
        if !info.is_damage_spell {
            println!("no damage");
            continue;
        }

        if spell.is_cantrip() {
            let by_level: Vec<String> = [1, 5, 11, 17]
                .iter()
                .map(|&lvl| format!("{lvl}: {}", calculate_cantrip_damage(&info, lvl, Some(3))))
                .collect();
            println!("{}", by_level.join(" | "));
        } else {
            let base = calculate_slot_damage(&info, spell.level, spell.level, Some(3));
            let top = calculate_slot_damage(&info, spell.level, 9, Some(3));
            println!("{base} -> {top} at slot 9 ({:?})", info.upgrade_type());
        }
    }
}
