use crate::progression::{LevelUp, StudyReward};
use std::fmt;

/// Where a study session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    /// Duration elapsed; waiting for the player to complete the session.
    Expired,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Snapshot returned by polling the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStatus {
    pub phase: TimerPhase,
    pub subject: Option<String>,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub duration_secs: u64,
}

impl TimerStatus {
    pub fn idle() -> Self {
        Self {
            phase: TimerPhase::Idle,
            subject: None,
            elapsed_secs: 0,
            remaining_secs: 0,
            duration_secs: 0,
        }
    }
}

/// Partial rewards from stopping a session before the timer ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyStopReward {
    pub elapsed_secs: u64,
    pub minutes_credited: u64,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub level_up: LevelUp,
}

/// How a session ended. The timer is back to idle in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Ran the full duration.
    Completed(StudyReward),
    /// Stopped early after the minimum study time.
    StoppedEarly(EarlyStopReward),
    /// Stopped before the minimum study time; nothing granted.
    Abandoned { elapsed_secs: u64 },
}

impl SessionOutcome {
    pub fn xp_gained(&self) -> u64 {
        match self {
            SessionOutcome::Completed(reward) => reward.xp_gained,
            SessionOutcome::StoppedEarly(reward) => reward.xp_gained,
            SessionOutcome::Abandoned { .. } => 0,
        }
    }

    pub fn gold_gained(&self) -> u64 {
        match self {
            SessionOutcome::Completed(reward) => reward.gold_gained,
            SessionOutcome::StoppedEarly(reward) => reward.gold_gained,
            SessionOutcome::Abandoned { .. } => 0,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionOutcome::Completed(reward) => format!(
                "Session recorded! You earned {} XP and {} gold.",
                reward.xp_gained, reward.gold_gained
            ),
            SessionOutcome::StoppedEarly(reward) => format!(
                "Session stopped early. You earned {} XP and {} gold.",
                reward.xp_gained, reward.gold_gained
            ),
            SessionOutcome::Abandoned { .. } => {
                "Studied less than 10 minutes. No rewards earned.".to_string()
            }
        }
    }
}
