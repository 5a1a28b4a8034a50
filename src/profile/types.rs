use super::stats::Stats;
use crate::core::constants::{
    FOCUS_POTION, FREE_TIME_PASS, REST_TOKEN, STARTING_LEVEL, STARTING_XP_THRESHOLD,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Player class. Studying a subject that matches the class affinity pays a bonus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PlayerClass {
    #[default]
    Novice,
    #[serde(rename = "Biotech Alchemist")]
    BiotechAlchemist,
    #[serde(rename = "Arcane Mathematician")]
    ArcaneMathematician,
    #[serde(rename = "Silver-Tongued Scholar")]
    SilverTonguedScholar,
}

impl PlayerClass {
    pub fn all() -> [PlayerClass; 4] {
        [
            PlayerClass::Novice,
            PlayerClass::BiotechAlchemist,
            PlayerClass::ArcaneMathematician,
            PlayerClass::SilverTonguedScholar,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Novice => "Novice",
            PlayerClass::BiotechAlchemist => "Biotech Alchemist",
            PlayerClass::ArcaneMathematician => "Arcane Mathematician",
            PlayerClass::SilverTonguedScholar => "Silver-Tongued Scholar",
        }
    }

    /// Lowercase keywords; a subject containing any of them gets the class bonus.
    pub fn affinity_keywords(&self) -> &'static [&'static str] {
        match self {
            PlayerClass::Novice => &[],
            PlayerClass::BiotechAlchemist => &["biology", "chemistry", "biotech"],
            PlayerClass::ArcaneMathematician => {
                &["math", "calculus", "algebra", "geometry", "statistics"]
            }
            PlayerClass::SilverTonguedScholar => {
                &["seminar", "english", "history", "psychology", "writing"]
            }
        }
    }

    pub fn has_affinity(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.affinity_keywords()
            .iter()
            .any(|keyword| subject.contains(keyword))
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One completed or early-stopped study interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub minutes: u64,
}

/// The single persisted player record.
///
/// Keys without `#[serde(default)]` are required: a record missing any of
/// them fails to parse and is treated as absent by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub class: PlayerClass,
    #[serde(with = "super::picture")]
    pub picture: Option<Vec<u8>>,
    pub level: u32,
    pub xp: u64,
    pub level_xp_threshold: u64,
    #[serde(default)]
    pub stat_points: u32,
    pub stats: Stats,
    pub gold: u64,
    /// Loot from gacha pulls and boss raids; sellable.
    pub items: BTreeMap<String, u32>,
    /// Consumables bought in the shop or earned by studying.
    pub inventory: BTreeMap<String, u32>,
    pub total_study_minutes: u64,
    pub subject_totals: BTreeMap<String, u64>,
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub timer_running: bool,
    #[serde(default)]
    pub timer_start: Option<DateTime<Utc>>,
    /// Seconds.
    #[serde(default)]
    pub timer_duration: Option<u64>,
    /// Seconds elapsed when the timer was paused.
    #[serde(default)]
    pub paused_time: Option<u64>,
    #[serde(default)]
    pub current_subject: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Scholar".to_string(), PlayerClass::default())
    }
}

impl Profile {
    /// Creates a new-game profile.
    pub fn new(name: String, class: PlayerClass) -> Self {
        let inventory = [FREE_TIME_PASS, REST_TOKEN, FOCUS_POTION]
            .into_iter()
            .map(|item| (item.to_string(), 0))
            .collect();

        Self {
            name,
            class,
            picture: None,
            level: STARTING_LEVEL,
            xp: 0,
            level_xp_threshold: STARTING_XP_THRESHOLD,
            stat_points: 0,
            stats: Stats::new(),
            gold: 0,
            items: BTreeMap::new(),
            inventory,
            total_study_minutes: 0,
            subject_totals: BTreeMap::new(),
            sessions: Vec::new(),
            timer_running: false,
            timer_start: None,
            timer_duration: None,
            paused_time: None,
            current_subject: None,
        }
    }

    pub fn item_count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    pub fn inventory_count(&self, name: &str) -> u32 {
        self.inventory.get(name).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, name: &str, quantity: u32) {
        let entry = self.items.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    pub fn add_inventory(&mut self, name: &str, quantity: u32) {
        let entry = self.inventory.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Records a study interval in the history and the running totals.
    pub fn record_session(&mut self, subject: &str, minutes: u64, timestamp: DateTime<Utc>) {
        self.sessions.push(SessionRecord { timestamp, minutes });
        self.total_study_minutes += minutes;
        *self.subject_totals.entry(subject.to_string()).or_insert(0) += minutes;
    }

    /// Resets every timer field to the idle state.
    pub fn clear_timer(&mut self) {
        self.timer_running = false;
        self.timer_start = None;
        self.timer_duration = None;
        self.paused_time = None;
        self.current_subject = None;
    }
}
