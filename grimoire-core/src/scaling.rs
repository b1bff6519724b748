//! Parsers for the "at higher levels" text of a spell.
//!
//! Leveled spells scale per spell slot level above their own
//! ("+1d6 par niveau d'emplacement supérieur à 3"); cantrips scale when the
//! caster reaches given character levels ("augmentent de 1d10 aux niveaux
//! 5, 11 et 17"). Every lexical rule is a small matcher returning an
//! `Option`, and each parser tries its matchers in a fixed order.

use crate::dice::{dice_tokens, extract_damage_components, DamageComponent};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static SLOT_UPGRADE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\+?\s*(\d+[dD]\d+)\b.*?\b(?:par|pour\s+chaque)\b.*?(?:niveau|emplacement)")
        .expect("valid regex")
});

static LEVEL_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bniveaux?\b").expect("valid regex"));

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:er|ème|eme|e)\b").expect("valid regex"));

static ORDINAL_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+\s*(?:er|ème|eme|e)\b(?:\s*(?:,\s*(?:et\s+)?|et\s+)\d+\s*(?:er|ème|eme|e)\b)*\s+niveaux?\b",
    )
    .expect("valid regex")
});

static LEVEL_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bniveaux?\b([^.]*)").expect("valid regex"));

static INCREASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:augmente(?:nt)?\s+de|gagne(?:nt)?)\s+(\d+[dD]\d+)").expect("valid regex")
});

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("valid regex"));

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

static DICE_NOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+[dD]\d+\b").expect("valid regex"));

/// Slot scaling of a leveled spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUpgrade {
    /// Dice added per step.
    pub pattern: Vec<DamageComponent>,
    /// Slot levels per step.
    pub per_levels: u8,
}

/// Character-level scaling of a cantrip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantripUpgrade {
    /// Dice added at each threshold.
    pub pattern: Vec<DamageComponent>,
    /// Ascending character levels, each adding one increment.
    pub thresholds: Vec<u8>,
}

/// The damage term starting at byte `start`, with its own type word.
fn component_at(text: &str, start: usize) -> Option<DamageComponent> {
    extract_damage_components(&text[start..]).into_iter().next()
}

// ============================================================================
// Slot scaling
// ============================================================================

/// Parse "+NdM ... par/pour chaque ... niveau/emplacement".
///
/// Returns `None` when the text has no slot scaling, which is the normal
/// case for many spells.
pub fn parse_slot_upgrade(text: &str) -> Option<SlotUpgrade> {
    let caps = SLOT_UPGRADE_RE.captures(text)?;
    let dice = caps.get(1)?;
    let increment = component_at(text, dice.start())?;

    debug!(increment = %increment, "parsed slot upgrade");
    Some(SlotUpgrade {
        pattern: vec![increment],
        per_levels: 1,
    })
}

// ============================================================================
// Cantrip scaling
// ============================================================================

fn skip_whitespace(s: &str, mut i: usize) -> usize {
    while let Some(c) = s[i..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        i += c.len_utf8();
    }
    i
}

/// A digit run at `i` that is not glued to an opening parenthesis and is
/// not the count of a dice term ("2d6").
fn read_level(s: &str, i: usize) -> Option<(u8, usize)> {
    let digits = s[i..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let end = i + digits;
    let mut rest = s[end..].bytes();
    match (rest.next(), rest.next()) {
        (Some(b'('), _) => return None,
        (Some(b'd' | b'D'), Some(d)) if d.is_ascii_digit() => return None,
        _ => {}
    }
    let level = s[i..end].parse().ok()?;
    Some((level, end))
}

fn skip_parenthetical(s: &str, i: usize) -> usize {
    if s[i..].starts_with('(') {
        if let Some(close) = s[i..].find(')') {
            return i + close + 1;
        }
    }
    i
}

fn read_et(s: &str, i: usize) -> Option<usize> {
    let mut chars = s[i..].chars();
    let is_et = matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('e'), Some('t'), Some(c)) if c.is_whitespace()
    );
    is_et.then_some(i + 2)
}

/// "," (optionally followed by "et") or "et".
fn read_list_separator(s: &str, i: usize) -> Option<usize> {
    if s[i..].starts_with(',') {
        let next = skip_whitespace(s, i + 1);
        return Some(read_et(s, next).unwrap_or(i + 1));
    }
    read_et(s, i)
}

/// "niveau 5", "niveaux 5, 11 et 17", "niveau 5 (2d10), 11 (3d10) et 17 (4d10)".
fn match_level_numbers(text: &str) -> Option<Vec<u8>> {
    let mut levels = Vec::new();

    for word in LEVEL_WORD_RE.find_iter(text) {
        let start = skip_whitespace(text, word.end());
        let Some((level, mut pos)) = read_level(text, start) else {
            continue;
        };
        levels.push(level);

        loop {
            let after = skip_whitespace(text, skip_parenthetical(text, skip_whitespace(text, pos)));
            let Some(next) = read_list_separator(text, after) else {
                break;
            };
            let Some((level, end)) = read_level(text, skip_whitespace(text, next)) else {
                break;
            };
            levels.push(level);
            pos = end;
        }
    }

    (!levels.is_empty()).then_some(levels)
}

/// "5e niveau", "11ème niveau", "les 5e, 11e et 17e niveaux".
fn match_ordinal_levels(text: &str) -> Option<Vec<u8>> {
    let levels: Vec<u8> = ORDINAL_LIST_RE
        .find_iter(text)
        .flat_map(|list| ORDINAL_RE.captures_iter(list.as_str()))
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    (!levels.is_empty()).then_some(levels)
}

/// Every integer of the first "niveau(x) ..." sentence, asides removed.
fn match_level_clause(text: &str) -> Option<Vec<u8>> {
    let caps = LEVEL_CLAUSE_RE.captures(text)?;
    let clause = PARENTHETICAL_RE.replace_all(&caps[1], " ");
    let clause = DICE_NOTATION_RE.replace_all(&clause, " ");
    let levels: Vec<u8> = INTEGER_RE
        .find_iter(&clause)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    (!levels.is_empty()).then_some(levels)
}

fn cantrip_thresholds(text: &str) -> Option<Vec<u8>> {
    let mut levels = match_level_numbers(text)
        .or_else(|| match_ordinal_levels(text))
        .or_else(|| match_level_clause(text))?;
    levels.retain(|&l| l > 0);
    levels.sort_unstable();
    levels.dedup();
    (!levels.is_empty()).then_some(levels)
}

/// "augmentent de 1d10", "gagne 1d8".
fn match_increase_phrase(text: &str) -> Option<DamageComponent> {
    let caps = INCREASE_RE.captures(text)?;
    component_at(text, caps.get(1)?.start())
}

/// First dice term outside parentheses.
///
/// Parenthesized dice are usually running totals ("niveau 5 (2d10)"), not
/// the increment.
fn match_first_bare_dice(text: &str) -> Option<DamageComponent> {
    let token = dice_tokens(text).into_iter().find(|t| {
        let before = &text[..t.start];
        before.matches('(').count() <= before.matches(')').count()
    })?;
    component_at(text, token.start)
}

fn cantrip_increment(text: &str) -> Option<DamageComponent> {
    match_increase_phrase(text).or_else(|| match_first_bare_dice(text))
}

/// Parse cantrip scaling: the character levels that trigger an increment,
/// and the increment itself.
///
/// Both are required; thresholds without dice count as unparsed.
pub fn parse_cantrip_upgrade(text: &str) -> Option<CantripUpgrade> {
    let thresholds = cantrip_thresholds(text)?;
    let increment = cantrip_increment(text)?;

    debug!(increment = %increment, ?thresholds, "parsed cantrip upgrade");
    Some(CantripUpgrade {
        pattern: vec![increment],
        thresholds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::DamageType;

    #[test]
    fn test_slot_upgrade_plus_form() {
        let up = parse_slot_upgrade("+1d6 par niveau d'emplacement supérieur à 3").unwrap();
        assert_eq!(up.per_levels, 1);
        assert_eq!(up.pattern, vec![DamageComponent::new(1, 6)]);
    }

    #[test]
    fn test_slot_upgrade_sentence_form() {
        let up = parse_slot_upgrade(
            "Lorsque vous lancez ce sort en utilisant un emplacement de niveau 4 ou supérieur, \
             les dégâts augmentent de 1d6 dégâts de feu pour chaque niveau d'emplacement au-delà du 3.",
        )
        .unwrap();
        assert_eq!(
            up.pattern,
            vec![DamageComponent::new(1, 6).with_damage_type(DamageType::Feu)]
        );
    }

    #[test]
    fn test_slot_upgrade_absent() {
        assert_eq!(parse_slot_upgrade("Vous pouvez cibler une créature de plus."), None);
        assert_eq!(parse_slot_upgrade("Les dégâts passent à 2d6."), None);
        assert_eq!(parse_slot_upgrade(""), None);
    }

    #[test]
    fn test_cantrip_list_of_levels() {
        let up = parse_cantrip_upgrade(
            "Les dégâts augmentent de 1d10 lorsque vous atteignez les niveaux 5, 11 et 17.",
        )
        .unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
        assert_eq!(up.pattern, vec![DamageComponent::new(1, 10)]);
    }

    #[test]
    fn test_cantrip_levels_with_running_totals() {
        let up = parse_cantrip_upgrade(
            "Les dégâts de ce sort augmentent de 1d8 au niveau 5 (2d8), 11 (3d8) et 17 (4d8).",
        )
        .unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
        assert_eq!(up.pattern, vec![DamageComponent::new(1, 8)]);
    }

    #[test]
    fn test_cantrip_repeated_level_words() {
        let up = parse_cantrip_upgrade(
            "Ce sort inflige 1d6 de plus au niveau 11 (3d6), au niveau 5 (2d6) et au niveau 17 (4d6).",
        )
        .unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
    }

    #[test]
    fn test_level_glued_to_parenthesis_is_ignored() {
        assert_eq!(match_level_numbers("niveau 5(2d10)"), None);
        assert_eq!(match_level_numbers("niveau 5 (2d10)"), Some(vec![5]));
    }

    #[test]
    fn test_cantrip_ordinal_levels() {
        let up = parse_cantrip_upgrade(
            "Les dégâts augmentent de 1d8 quand vous atteignez le 5e niveau, le 11e niveau et le 17e niveau.",
        )
        .unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
    }

    #[test]
    fn test_dice_after_level_is_not_a_level() {
        let up = parse_cantrip_upgrade(
            "Ce sort inflige 1d6 de plus au niveau 5, 2d6 de plus au niveau 11 et 3d6 de plus au niveau 17.",
        )
        .unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
        assert_eq!(up.pattern, vec![DamageComponent::new(1, 6)]);
        assert_eq!(read_level("2d6 de plus", 0), None);
        assert_eq!(read_level("2 dés", 0), Some((2, 1)));
    }

    #[test]
    fn test_comma_then_et_in_level_list() {
        assert_eq!(
            match_level_numbers("aux niveaux 5, 11, et 17."),
            Some(vec![5, 11, 17])
        );
    }

    #[test]
    fn test_cantrip_plural_ordinal_list() {
        let up = parse_cantrip_upgrade(
            "Les dégâts augmentent de 1d10 lorsque vous atteignez les 5e, 11e et 17e niveaux.",
        )
        .unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
        assert_eq!(
            match_ordinal_levels("aux 5ème, 11ème, et 17ème niveaux"),
            Some(vec![5, 11, 17])
        );
    }

    #[test]
    fn test_cantrip_level_clause_fallback() {
        assert_eq!(
            match_level_clause("aux niveaux suivants : 5 (2d4), 11 et 17, +1d4"),
            Some(vec![5, 11, 17])
        );
        let up =
            parse_cantrip_upgrade("Gagne 1d4 aux niveaux suivants : 5, 11 et 17.").unwrap();
        assert_eq!(up.thresholds, vec![5, 11, 17]);
    }

    #[test]
    fn test_increase_phrase_beats_parenthetical() {
        let up = parse_cantrip_upgrade(
            "Sous forme de loup (2d6), rien ne change. Les dégâts augmentent de 1d8 aux niveaux 5 et 11.",
        )
        .unwrap();
        assert_eq!(up.pattern, vec![DamageComponent::new(1, 8)]);
    }

    #[test]
    fn test_bare_dice_fallback_skips_parentheses() {
        let up = parse_cantrip_upgrade(
            "Au niveau 5 (2d6), la cible subit 1d6 dégâts de poison supplémentaires.",
        )
        .unwrap();
        assert_eq!(
            up.pattern,
            vec![DamageComponent::new(1, 6).with_damage_type(DamageType::Poison)]
        );
        assert_eq!(up.thresholds, vec![5]);
    }

    #[test]
    fn test_cantrip_without_dice_is_unparsed() {
        assert_eq!(
            parse_cantrip_upgrade("Le sort crée un rayon de plus aux niveaux 5, 11 et 17."),
            None
        );
    }

    #[test]
    fn test_cantrip_without_levels_is_unparsed() {
        assert_eq!(parse_cantrip_upgrade("Les dégâts augmentent de 1d10."), None);
    }
}
