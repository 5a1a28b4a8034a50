use crate::core::constants::*;
use crate::core::error::{EngineError, Result};
use crate::profile::{normalize_subject, Profile, StatType};
use chrono::{DateTime, Utc};
use tracing::info;

/// Result of routing XP through the level curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUp {
    pub levels_gained: u32,
    pub stat_points_gained: u32,
}

/// Rewards granted for a finished study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyReward {
    pub minutes: u64,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub rest_tokens: u32,
    pub class_bonus: bool,
    pub level_up: LevelUp,
}

/// XP threshold for the level after one whose threshold is `threshold`.
pub fn next_xp_threshold(threshold: u64) -> u64 {
    let grown = (threshold as f64 * XP_THRESHOLD_GROWTH) as u64;
    grown.max(threshold.saturating_add(1))
}

/// Base (xp, gold) for studying `minutes`, with the class bonus applied when it holds.
pub fn study_rewards(minutes: u64, class_bonus: bool) -> (u64, u64) {
    let xp = minutes * XP_PER_MINUTE;
    let gold = minutes * GOLD_PER_MINUTE;
    if class_bonus {
        let multiplier = 1.0 + CLASS_AFFINITY_BONUS;
        (
            (xp as f64 * multiplier).floor() as u64,
            (gold as f64 * multiplier).floor() as u64,
        )
    } else {
        (xp, gold)
    }
}

/// Adds XP and processes any level-ups.
///
/// Each level-up subtracts the current threshold, grows the threshold and
/// grants stat points. Afterwards `xp < level_xp_threshold` holds.
pub fn add_xp(profile: &mut Profile, amount: u64) -> LevelUp {
    profile.xp = profile.xp.saturating_add(amount);
    // Guards against hand-edited records with a zero threshold.
    profile.level_xp_threshold = profile.level_xp_threshold.max(1);

    let mut result = LevelUp::default();
    while profile.xp >= profile.level_xp_threshold {
        profile.xp -= profile.level_xp_threshold;
        profile.level = profile.level.saturating_add(1);
        profile.level_xp_threshold = next_xp_threshold(profile.level_xp_threshold);
        profile.stat_points = profile.stat_points.saturating_add(STAT_POINTS_PER_LEVEL);

        result.levels_gained += 1;
        result.stat_points_gained += STAT_POINTS_PER_LEVEL;
    }

    if result.levels_gained > 0 {
        info!(
            level = profile.level,
            stat_points = profile.stat_points,
            "level up"
        );
    }
    result
}

/// Credits a completed study session.
pub fn award_study(
    profile: &mut Profile,
    minutes: u64,
    subject: &str,
    now: DateTime<Utc>,
) -> Result<StudyReward> {
    let subject = normalize_subject(subject);
    if subject.is_empty() {
        return Err(EngineError::invalid("subject cannot be empty"));
    }
    if minutes == 0 {
        return Err(EngineError::invalid("study minutes must be positive"));
    }

    let class_bonus = profile.class.has_affinity(&subject);
    let (xp_gained, gold_gained) = study_rewards(minutes, class_bonus);
    let rest_tokens = u32::try_from(minutes / REST_TOKEN_MINUTES).unwrap_or(u32::MAX);

    profile.record_session(&subject, minutes, now);
    profile.gold = profile.gold.saturating_add(gold_gained);
    if rest_tokens > 0 {
        profile.add_inventory(REST_TOKEN, rest_tokens);
    }
    let level_up = add_xp(profile, xp_gained);

    info!(
        subject = %subject,
        minutes,
        xp = xp_gained,
        gold = gold_gained,
        class_bonus,
        "study session credited"
    );

    Ok(StudyReward {
        minutes,
        xp_gained,
        gold_gained,
        rest_tokens,
        class_bonus,
        level_up,
    })
}

/// Spends one stat point on `stat_name`. Returns the stat's new value.
pub fn upgrade_stat(profile: &mut Profile, stat_name: &str) -> Result<u32> {
    let stat: StatType = stat_name.parse().map_err(EngineError::InvalidArgument)?;
    if profile.stat_points == 0 {
        return Err(EngineError::InsufficientPoints);
    }

    profile.stat_points -= 1;
    profile.stats.increment(stat);
    Ok(profile.stats.get(stat))
}

/// Default subjects followed by any custom subjects the player has logged.
pub fn known_subjects(profile: &Profile) -> Vec<String> {
    let mut subjects: Vec<String> = DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect();
    for subject in profile.subject_totals.keys() {
        if !subjects.iter().any(|s| s.eq_ignore_ascii_case(subject)) {
            subjects.push(subject.clone());
        }
    }
    subjects
}
