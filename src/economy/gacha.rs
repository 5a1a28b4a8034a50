//! Gacha loot table and spin logic.

use crate::core::constants::{FOCUS_POTION, GACHA_COST};
use crate::core::error::{EngineError, Result};
use crate::profile::{Profile, StatType};
use rand::Rng;
use tracing::info;

/// Extra effect applied when an entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootEffect {
    None,
    Stats(&'static [(StatType, u32)]),
    Consumable(&'static str, u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootEntry {
    pub name: &'static str,
    pub chance: f64,
    pub effect: LootEffect,
}

/// Chances sum to 1.0.
pub const GACHA_POOL: [LootEntry; 7] = [
    LootEntry {
        name: "Worn Notebook",
        chance: 0.35,
        effect: LootEffect::None,
    },
    LootEntry {
        name: "Ink-Stained Quill",
        chance: 0.25,
        effect: LootEffect::Stats(&[(StatType::Intelligence, 1)]),
    },
    LootEntry {
        name: "Iron Bookend",
        chance: 0.15,
        effect: LootEffect::Stats(&[(StatType::Defense, 1)]),
    },
    LootEntry {
        name: "Sharpened Pencil",
        chance: 0.12,
        effect: LootEffect::Stats(&[(StatType::Attack, 1)]),
    },
    LootEntry {
        name: "Focus Potion Flask",
        chance: 0.08,
        effect: LootEffect::Consumable(FOCUS_POTION, 1),
    },
    LootEntry {
        name: "Tome of Insight",
        chance: 0.04,
        effect: LootEffect::Stats(&[(StatType::Intelligence, 2)]),
    },
    LootEntry {
        name: "Scholar's Crown",
        chance: 0.01,
        effect: LootEffect::Stats(&[
            (StatType::Attack, 1),
            (StatType::Defense, 1),
            (StatType::Intelligence, 1),
        ]),
    },
];

/// A successful spin.
#[derive(Debug, Clone, PartialEq)]
pub struct GachaPull {
    pub item: &'static str,
    pub effect: LootEffect,
    pub message: String,
}

pub fn total_chance(pool: &[LootEntry]) -> f64 {
    pool.iter().map(|e| e.chance).sum()
}

/// Picks the entry whose cumulative-chance band contains `roll` (in `[0, 1)`).
/// Falls back to the last entry if floating-point residue leaves a gap.
pub fn pick_entry(pool: &[LootEntry], roll: f64) -> Option<&LootEntry> {
    let mut cumulative = 0.0;
    for entry in pool {
        cumulative += entry.chance;
        if roll < cumulative {
            return Some(entry);
        }
    }
    pool.last()
}

pub fn apply_effect(profile: &mut Profile, effect: LootEffect) {
    match effect {
        LootEffect::None => {}
        LootEffect::Stats(bonuses) => {
            for &(stat, amount) in bonuses {
                profile.stats.add(stat, amount);
            }
        }
        LootEffect::Consumable(name, quantity) => profile.add_inventory(name, quantity),
    }
}

pub fn describe_effect(effect: LootEffect) -> String {
    match effect {
        LootEffect::None => String::new(),
        LootEffect::Stats(bonuses) => bonuses
            .iter()
            .map(|(stat, amount)| format!("+{} {}", amount, stat.abbrev()))
            .collect::<Vec<_>>()
            .join(" "),
        LootEffect::Consumable(name, quantity) => format!("+{} {}", quantity, name),
    }
}

/// Spends `GACHA_COST` gold for one draw from the pool.
pub fn gacha_spin<R: Rng>(profile: &mut Profile, rng: &mut R) -> Result<GachaPull> {
    if profile.gold < GACHA_COST {
        return Err(EngineError::InsufficientFunds {
            needed: GACHA_COST,
            available: profile.gold,
        });
    }

    let roll = rng.gen::<f64>();
    let entry = *pick_entry(&GACHA_POOL, roll)
        .ok_or_else(|| EngineError::invalid("gacha pool is empty"))?;

    profile.gold -= GACHA_COST;
    profile.add_item(entry.name, 1);
    apply_effect(profile, entry.effect);

    let bonus = describe_effect(entry.effect);
    let message = if bonus.is_empty() {
        format!("You won a {}!", entry.name)
    } else {
        format!("You won a {}! ({})", entry.name, bonus)
    };
    info!(item = entry.name, roll, "gacha spin");

    Ok(GachaPull {
        item: entry.name,
        effect: entry.effect,
        message,
    })
}
