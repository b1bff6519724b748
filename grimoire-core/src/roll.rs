//! Rolling compiled damage.

use crate::compile::CompiledDamage;
use crate::dice::DamageComponent;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Most dice a single roll will throw.
pub const MAX_ROLLED_DICE: u64 = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RollError {
    #[error("Too many dice to roll: {count} (max {max})")]
    TooManyDice { count: u64, max: u64 },
}

/// Result of rolling a single damage term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolledComponent {
    pub component: DamageComponent,
    pub rolls: Vec<u32>,
    pub subtotal: u64,
}

/// Complete result of a damage roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageRoll {
    pub parts: Vec<RolledComponent>,
    pub modifier: i32,
    pub total: i64,
}

impl CompiledDamage {
    /// Roll every term with the thread RNG.
    pub fn roll(&self) -> Result<DamageRoll, RollError> {
        self.roll_with_rng(&mut rand::thread_rng())
    }

    /// Roll with a specific RNG (useful for testing).
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> Result<DamageRoll, RollError> {
        let count: u64 = self
            .components
            .iter()
            .map(|c| u64::from(c.dice_count))
            .sum();
        if count > MAX_ROLLED_DICE {
            return Err(RollError::TooManyDice {
                count,
                max: MAX_ROLLED_DICE,
            });
        }

        let parts: Vec<RolledComponent> = self
            .components
            .iter()
            .map(|component| {
                let rolls: Vec<u32> = (0..component.dice_count)
                    .map(|_| rng.gen_range(1..=component.dice_type.max(1)))
                    .collect();
                RolledComponent {
                    component: component.clone(),
                    subtotal: rolls.iter().map(|&r| u64::from(r)).sum(),
                    rolls,
                }
            })
            .collect();

        let modifier = self.modifier.unwrap_or(0);
        let dice_total: u64 = parts.iter().map(|p| p.subtotal).sum();
        let total = i64::try_from(dice_total)
            .unwrap_or(i64::MAX)
            .saturating_add(i64::from(modifier));

        Ok(DamageRoll {
            parts,
            modifier,
            // Damage never goes below zero, even with a negative modifier.
            total: total.max(0),
        })
    }
}

impl DamageRoll {
    /// Format the individual dice results for display.
    pub fn dice_display(&self) -> String {
        let dice_str = self
            .parts
            .iter()
            .map(|p| {
                let rolls = p
                    .rolls
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                match p.component.damage_type {
                    Some(t) => format!("[{rolls}] {t}"),
                    None => format!("[{rolls}]"),
                }
            })
            .collect::<Vec<_>>()
            .join(" + ");

        match self.modifier {
            0 => dice_str,
            m if m > 0 => format!("{dice_str} +{m}"),
            m => format!("{dice_str} {m}"),
        }
    }
}

impl fmt::Display for DamageRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.dice_display(), self.total)
    }
}
