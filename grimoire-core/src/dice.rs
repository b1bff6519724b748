//! Dice damage terms and their extraction from spell text.
//!
//! A damage term is an `NdM` token, optionally followed in the same clause
//! by its damage type: "8d6 dégâts de feu", "1d10 dégâts nécrotiques".

use crate::vocab::DamageType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Error type for dice notation parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
    #[error("Unknown damage type: {0}")]
    UnknownDamageType(String),
}

/// One dice-damage term of a spell, e.g. `2d6 feu`.
///
/// The formula is always derived from `dice_count` and `dice_type`, so it
/// cannot disagree with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ComponentRepr", from = "ComponentRepr")]
pub struct DamageComponent {
    pub dice_count: u32,
    pub dice_type: u32,
    pub damage_type: Option<DamageType>,
}

/// Key under which increments merge into existing terms.
pub type MergeKey = (u32, Option<DamageType>);

impl DamageComponent {
    pub fn new(dice_count: u32, dice_type: u32) -> Self {
        Self {
            dice_count,
            dice_type,
            damage_type: None,
        }
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    /// Canonical `NdM` form.
    pub fn formula(&self) -> String {
        format!("{}d{}", self.dice_count, self.dice_type)
    }

    pub fn key(&self) -> MergeKey {
        (self.dice_type, self.damage_type)
    }

    /// Same die and type, `multiplier` times as many dice (saturating).
    pub fn scaled(&self, multiplier: u32) -> Self {
        Self {
            dice_count: self.dice_count.saturating_mul(multiplier),
            ..self.clone()
        }
    }

    /// Expected value of the roll.
    pub fn average(&self) -> f64 {
        self.dice_count as f64 * (self.dice_type as f64 + 1.0) / 2.0
    }
}

impl fmt::Display for DamageComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.damage_type {
            Some(t) => write!(f, "{} {}", self.formula(), t),
            None => write!(f, "{}", self.formula()),
        }
    }
}

impl FromStr for DamageComponent {
    type Err = DiceError;

    /// Parse `"2d6"` or `"2d6 feu"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let dice = words.next().ok_or(DiceError::NoDice)?.to_lowercase();

        let d_pos = dice
            .find('d')
            .ok_or_else(|| DiceError::InvalidNotation(s.to_string()))?;
        let count_str = &dice[..d_pos];
        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DiceError::InvalidNotation(s.to_string()))?
        };
        if count == 0 {
            return Err(DiceError::NoDice);
        }
        let sides: u32 = dice[d_pos + 1..]
            .parse()
            .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;
        if sides < 2 {
            return Err(DiceError::InvalidDieSize(sides));
        }

        let mut component = DamageComponent::new(count, sides);
        if let Some(word) = words.next() {
            let damage_type = DamageType::from_word(word)
                .ok_or_else(|| DiceError::UnknownDamageType(word.to_string()))?;
            component.damage_type = Some(damage_type);
        }
        if words.next().is_some() {
            return Err(DiceError::InvalidNotation(s.to_string()));
        }
        Ok(component)
    }
}

#[derive(Serialize, Deserialize)]
struct ComponentRepr {
    dice_count: u32,
    dice_type: u32,
    #[serde(default, skip_deserializing)]
    formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    damage_type: Option<DamageType>,
}

impl From<DamageComponent> for ComponentRepr {
    fn from(c: DamageComponent) -> Self {
        Self {
            formula: c.formula(),
            dice_count: c.dice_count,
            dice_type: c.dice_type,
            damage_type: c.damage_type,
        }
    }
}

impl From<ComponentRepr> for DamageComponent {
    fn from(r: ComponentRepr) -> Self {
        Self {
            dice_count: r.dice_count,
            dice_type: r.dice_type,
            damage_type: r.damage_type,
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

static DICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)[dD](\d+)\b").expect("valid regex"));

/// A dice token found in text, with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DiceToken {
    pub dice_count: u32,
    pub dice_type: u32,
    pub start: usize,
    pub end: usize,
}

/// Every valid `NdM` token in `text`, in order.
pub(crate) fn dice_tokens(text: &str) -> Vec<DiceToken> {
    DICE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let dice_count: u32 = caps[1].parse().ok()?;
            let dice_type: u32 = caps[2].parse().ok()?;
            (dice_count >= 1 && dice_type >= 2).then_some(DiceToken {
                dice_count,
                dice_type,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

fn is_clause_break(c: char) -> bool {
    matches!(c, '.' | ';' | ':' | ',' | '(' | ')' | '\n')
}

fn is_damage_word(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "dégâts" | "dégât" | "degats" | "degat"
    )
}

fn is_type_connector(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "de" | "d" | "du" | "type")
}

/// Damage type named next to a dice term.
///
/// Either right after the dice ("2d6 feu") or in the "dégâts [de] <type>"
/// phrase that follows them ("1d8 + modificateur de Force dégâts
/// contondants"). Other words of the clause never name the type, so "points
/// de vie ... contre le poison" or "jet de sauvegarde de Force" stay untyped.
fn damage_type_in_clause(clause: &str) -> Option<DamageType> {
    let words: Vec<&str> = clause
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    if let Some(t) = words.first().and_then(|w| DamageType::from_word(w)) {
        return Some(t);
    }

    words
        .iter()
        .enumerate()
        .filter(|(_, w)| is_damage_word(w))
        .find_map(|(i, _)| {
            words[i + 1..]
                .iter()
                .find(|w| !is_type_connector(w))
                .and_then(|w| DamageType::from_word(w))
        })
}

/// Extract the damage terms of a description, in order of appearance.
///
/// Each dice token looks for its own type word between itself and the next
/// token or clause break; types never carry over from one term to another.
pub fn extract_damage_components(text: &str) -> Vec<DamageComponent> {
    let tokens = dice_tokens(text);
    let mut components = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let limit = tokens.get(i + 1).map_or(text.len(), |next| next.start);
        let tail = &text[token.end..limit];
        let clause = tail.find(is_clause_break).map_or(tail, |pos| &tail[..pos]);

        components.push(DamageComponent {
            dice_count: token.dice_count,
            dice_type: token.dice_type,
            damage_type: damage_type_in_clause(clause),
        });
    }

    tracing::trace!(count = components.len(), "extracted damage components");
    components
}
