use crate::core::constants::*;
use crate::profile::{Profile, StatType};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boss {
    pub name: &'static str,
    pub attack: u32,
    pub defense: u32,
}

impl Boss {
    pub fn power(&self) -> u32 {
        self.attack + self.defense
    }
}

pub const RAID_BOSS: Boss = Boss {
    name: BOSS_NAME,
    attack: BOSS_ATTACK,
    defense: BOSS_DEFENSE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidOutcome {
    pub won: bool,
    pub player_power: u32,
    pub boss_power: u32,
    pub message: String,
}

/// Offensive power used against the boss: attack plus intelligence.
pub fn player_power(profile: &Profile) -> u32 {
    profile
        .stats
        .get(StatType::Attack)
        .saturating_add(profile.stats.get(StatType::Intelligence))
}

/// Deterministic boss fight. A win grants the boss trophy and its stat bonus;
/// a loss changes nothing.
pub fn boss_raid(profile: &mut Profile) -> RaidOutcome {
    let player_power = player_power(profile);
    let boss_power = RAID_BOSS.power();
    let won = player_power >= boss_power;

    let message = if won {
        profile.add_item(BOSS_TROPHY, 1);
        profile
            .stats
            .add(StatType::Intelligence, BOSS_TROPHY_INTELLIGENCE);
        format!(
            "You defeated the {}! You earned the {} (+{} INT).",
            RAID_BOSS.name, BOSS_TROPHY, BOSS_TROPHY_INTELLIGENCE
        )
    } else {
        format!(
            "The {} was too strong ({} vs {}). Train and try again!",
            RAID_BOSS.name, player_power, boss_power
        )
    };

    info!(won, player_power, boss_power, "boss raid");
    RaidOutcome {
        won,
        player_power,
        boss_power,
        message,
    }
}
