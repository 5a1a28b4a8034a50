use crate::core::constants::{BASE_STAT_VALUE, NUM_STATS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Attack,
    Defense,
    Intelligence,
}

impl StatType {
    pub fn all() -> [StatType; NUM_STATS] {
        [StatType::Attack, StatType::Defense, StatType::Intelligence]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatType::Attack => "attack",
            StatType::Defense => "defense",
            StatType::Intelligence => "intelligence",
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Attack => "ATK",
            StatType::Defense => "DEF",
            StatType::Intelligence => "INT",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StatType::all()
            .into_iter()
            .find(|stat| {
                stat.name().eq_ignore_ascii_case(wanted) || stat.abbrev().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown stat '{}'", wanted))
    }
}

/// Persisted as a JSON object keyed by stat name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub intelligence: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            attack: BASE_STAT_VALUE,
            defense: BASE_STAT_VALUE,
            intelligence: BASE_STAT_VALUE,
        }
    }

    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::Intelligence => self.intelligence,
        }
    }

    fn slot(&mut self, stat: StatType) -> &mut u32 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::Intelligence => &mut self.intelligence,
        }
    }

    pub fn set(&mut self, stat: StatType, value: u32) {
        *self.slot(stat) = value;
    }

    pub fn increment(&mut self, stat: StatType) {
        self.add(stat, 1);
    }

    pub fn add(&mut self, stat: StatType, amount: u32) {
        let slot = self.slot(stat);
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u32 {
        StatType::all().iter().map(|s| self.get(*s)).sum()
    }
}
