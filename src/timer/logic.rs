//! Poll-based study timer.
//!
//! Nothing here schedules callbacks: the phase is recomputed from the stored
//! start timestamp each time the caller polls.

use super::types::*;
use crate::core::constants::*;
use crate::core::error::{EngineError, Result};
use crate::profile::{normalize_subject, Profile};
use crate::progression::{add_xp, award_study};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

fn seconds_between(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - start).num_seconds().max(0) as u64
}

/// Seconds studied so far, or `None` when no session is active.
fn elapsed_secs(profile: &Profile, now: DateTime<Utc>) -> Option<u64> {
    if profile.timer_running {
        profile.timer_start.map(|start| seconds_between(start, now))
    } else {
        profile.paused_time
    }
}

/// Subject of the active session, or `FALLBACK_SUBJECT` if the record has none.
fn session_subject(profile: &Profile) -> String {
    profile
        .current_subject
        .as_deref()
        .map(normalize_subject)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_SUBJECT.to_string())
}

/// Current phase, derived from the stored timer fields.
pub fn phase(profile: &Profile, now: DateTime<Utc>) -> TimerPhase {
    let Some(duration) = profile.timer_duration else {
        return TimerPhase::Idle;
    };
    match (profile.timer_running, elapsed_secs(profile, now)) {
        (true, Some(elapsed)) if elapsed >= duration => TimerPhase::Expired,
        (true, Some(_)) => TimerPhase::Running,
        (false, Some(_)) => TimerPhase::Paused,
        _ => TimerPhase::Idle,
    }
}

fn require(
    profile: &Profile,
    now: DateTime<Utc>,
    allowed: &[TimerPhase],
    action: &'static str,
) -> Result<TimerPhase> {
    let current = phase(profile, now);
    if allowed.contains(&current) {
        Ok(current)
    } else {
        Err(EngineError::InvalidTransition {
            phase: current,
            action,
        })
    }
}

/// Reports the phase and countdown without changing anything.
pub fn poll(profile: &Profile, now: DateTime<Utc>) -> TimerStatus {
    let current = phase(profile, now);
    if current == TimerPhase::Idle {
        return TimerStatus::idle();
    }

    let duration = profile.timer_duration.unwrap_or(0);
    let elapsed = elapsed_secs(profile, now).unwrap_or(0).min(duration);
    TimerStatus {
        phase: current,
        subject: profile.current_subject.clone(),
        elapsed_secs: elapsed,
        remaining_secs: duration - elapsed,
        duration_secs: duration,
    }
}

/// Idle -> Running.
pub fn start(
    profile: &mut Profile,
    minutes: u32,
    subject: &str,
    now: DateTime<Utc>,
) -> Result<TimerStatus> {
    require(profile, now, &[TimerPhase::Idle], "start")?;

    if !(MIN_TIMER_MINUTES..=MAX_TIMER_MINUTES).contains(&minutes) {
        return Err(EngineError::invalid(format!(
            "timer must be between {} and {} minutes",
            MIN_TIMER_MINUTES, MAX_TIMER_MINUTES
        )));
    }
    let subject = normalize_subject(subject);
    if subject.is_empty() {
        return Err(EngineError::invalid("subject cannot be empty"));
    }

    profile.clear_timer();
    profile.timer_start = Some(now);
    profile.timer_duration = Some(u64::from(minutes) * 60);
    profile.timer_running = true;
    profile.current_subject = Some(subject);

    debug!(minutes, subject = ?profile.current_subject, "timer started");
    Ok(poll(profile, now))
}

/// Running -> Paused.
pub fn pause(profile: &mut Profile, now: DateTime<Utc>) -> Result<TimerStatus> {
    require(profile, now, &[TimerPhase::Running], "pause")?;

    profile.paused_time = elapsed_secs(profile, now);
    profile.timer_running = false;

    debug!(elapsed = ?profile.paused_time, "timer paused");
    Ok(poll(profile, now))
}

/// Paused -> Running, with the start shifted so elapsed time carries over.
pub fn resume(profile: &mut Profile, now: DateTime<Utc>) -> Result<TimerStatus> {
    require(profile, now, &[TimerPhase::Paused], "resume")?;

    let duration = profile.timer_duration.unwrap_or(0);
    let paused = profile.paused_time.take().unwrap_or(0).min(duration);
    let start = i64::try_from(paused)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|offset| now.checked_sub_signed(offset))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    profile.timer_start = Some(start);
    profile.timer_running = true;

    debug!(elapsed = paused, "timer resumed");
    Ok(poll(profile, now))
}

/// Partial reward for `elapsed` seconds of a `duration`-second session:
/// `floor(elapsed / duration * per_minute * duration_minutes)`.
pub fn partial_reward(elapsed: u64, duration: u64, per_minute: u64) -> u64 {
    if duration == 0 {
        return 0;
    }
    let numerator = u128::from(elapsed) * u128::from(per_minute) * u128::from(duration);
    let denominator = u128::from(duration) * 60;
    (numerator / denominator) as u64
}

/// Running|Paused -> Idle, granting partial rewards after ten minutes of study.
pub fn stop_early(profile: &mut Profile, now: DateTime<Utc>) -> Result<SessionOutcome> {
    require(profile, now, &[TimerPhase::Running, TimerPhase::Paused], "stop")?;

    let duration = profile.timer_duration.unwrap_or(0);
    let elapsed = elapsed_secs(profile, now).unwrap_or(0).min(duration);
    let subject = session_subject(profile);

    let outcome = if elapsed >= MIN_EARLY_STOP_SECONDS {
        let xp_gained = partial_reward(elapsed, duration, XP_PER_MINUTE);
        let gold_gained = partial_reward(elapsed, duration, GOLD_PER_MINUTE);
        let minutes_credited = elapsed / 60;

        profile.record_session(&subject, minutes_credited, now);
        profile.gold = profile.gold.saturating_add(gold_gained);
        let level_up = add_xp(profile, xp_gained);

        info!(
            subject = %subject,
            elapsed,
            xp = xp_gained,
            gold = gold_gained,
            "session stopped early"
        );
        SessionOutcome::StoppedEarly(EarlyStopReward {
            elapsed_secs: elapsed,
            minutes_credited,
            xp_gained,
            gold_gained,
            level_up,
        })
    } else {
        debug!(elapsed, "session abandoned before minimum study time");
        SessionOutcome::Abandoned {
            elapsed_secs: elapsed,
        }
    };

    profile.clear_timer();
    Ok(outcome)
}

/// Expired -> Idle, crediting the full session.
pub fn complete(profile: &mut Profile, now: DateTime<Utc>) -> Result<SessionOutcome> {
    require(profile, now, &[TimerPhase::Expired], "complete")?;

    // At least one minute, so a sub-minute duration in a stored record still completes.
    let minutes = (profile.timer_duration.unwrap_or(0) / 60).max(1);
    let subject = session_subject(profile);
    let reward = award_study(profile, minutes, &subject, now)?;

    profile.clear_timer();
    Ok(SessionOutcome::Completed(reward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap()
    }

    fn secs(n: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(n)
    }

    fn running(minutes: u32) -> Profile {
        let mut profile = Profile::default();
        start(&mut profile, minutes, "AMC Math", t0()).unwrap();
        profile
    }

    #[test]
    fn test_new_profile_is_idle() {
        let profile = Profile::default();
        assert_eq!(phase(&profile, t0()), TimerPhase::Idle);
        assert_eq!(poll(&profile, t0()), TimerStatus::idle());
    }

    #[test]
    fn test_start_sets_fields() {
        let profile = running(30);
        assert!(profile.timer_running);
        assert_eq!(profile.timer_start, Some(t0()));
        assert_eq!(profile.timer_duration, Some(1800));
        assert_eq!(profile.current_subject.as_deref(), Some("AMC Math"));

        let status = poll(&profile, secs(90));
        assert_eq!(status.phase, TimerPhase::Running);
        assert_eq!(status.elapsed_secs, 90);
        assert_eq!(status.remaining_secs, 1710);
    }

    #[test]
    fn test_start_validates_input() {
        let mut profile = Profile::default();
        assert!(matches!(
            start(&mut profile, 4, "Biology", t0()),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            start(&mut profile, 181, "Biology", t0()),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            start(&mut profile, 30, "", t0()),
            Err(EngineError::InvalidArgument(_))
        ));
        assert_eq!(phase(&profile, t0()), TimerPhase::Idle);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut profile = running(30);
        let before = profile.clone();
        let err = start(&mut profile, 60, "Biology", secs(5)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition {
                phase: TimerPhase::Running,
                action: "start"
            }
        ));
        assert_eq!(profile, before);
    }

    #[test]
    fn test_expires_on_poll() {
        let profile = running(5);
        assert_eq!(phase(&profile, secs(299)), TimerPhase::Running);
        assert_eq!(phase(&profile, secs(300)), TimerPhase::Expired);
        let status = poll(&profile, secs(10_000));
        assert_eq!(status.phase, TimerPhase::Expired);
        assert_eq!(status.remaining_secs, 0);
        assert_eq!(status.elapsed_secs, 300);
    }

    #[test]
    fn test_pause_and_resume_carry_elapsed() {
        let mut profile = running(30);
        let status = pause(&mut profile, secs(400)).unwrap();
        assert_eq!(status.phase, TimerPhase::Paused);
        assert_eq!(profile.paused_time, Some(400));
        assert!(!profile.timer_running);

        // Time passing while paused does not count.
        assert_eq!(poll(&profile, secs(5000)).elapsed_secs, 400);

        let status = resume(&mut profile, secs(5000)).unwrap();
        assert_eq!(status.phase, TimerPhase::Running);
        assert_eq!(status.elapsed_secs, 400);
        assert_eq!(profile.paused_time, None);
        assert_eq!(profile.timer_start, Some(secs(4600)));
        assert_eq!(phase(&profile, secs(4600 + 1800)), TimerPhase::Expired);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut idle = Profile::default();
        assert!(pause(&mut idle, t0()).is_err());
        assert!(resume(&mut idle, t0()).is_err());
        assert!(stop_early(&mut idle, t0()).is_err());
        assert!(complete(&mut idle, t0()).is_err());

        let mut profile = running(30);
        assert!(resume(&mut profile, secs(10)).is_err());
        assert!(complete(&mut profile, secs(10)).is_err());

        pause(&mut profile, secs(10)).unwrap();
        assert!(pause(&mut profile, secs(20)).is_err());
        assert!(complete(&mut profile, secs(20)).is_err());
    }

    #[test]
    fn test_expired_cannot_pause_or_stop() {
        let mut profile = running(5);
        assert!(pause(&mut profile, secs(301)).is_err());
        assert!(stop_early(&mut profile, secs(301)).is_err());
        assert_eq!(phase(&profile, secs(301)), TimerPhase::Expired);
    }

    #[test]
    fn test_partial_reward() {
        assert_eq!(partial_reward(600, 1800, XP_PER_MINUTE), 100);
        assert_eq!(partial_reward(600, 1800, GOLD_PER_MINUTE), 50);
        assert_eq!(partial_reward(899, 3600, XP_PER_MINUTE), 149);
        assert_eq!(partial_reward(100, 0, XP_PER_MINUTE), 0);
    }

    #[test]
    fn test_stop_early_at_599_grants_nothing() {
        let mut profile = running(30);
        let outcome = stop_early(&mut profile, secs(599)).unwrap();
        assert_eq!(outcome, SessionOutcome::Abandoned { elapsed_secs: 599 });
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.gold, 0);
        assert!(profile.sessions.is_empty());
        assert_eq!(phase(&profile, secs(600)), TimerPhase::Idle);
    }

    #[test]
    fn test_stop_early_at_600_grants_partial_reward() {
        let mut profile = running(30);
        let outcome = stop_early(&mut profile, secs(600)).unwrap();
        match outcome {
            SessionOutcome::StoppedEarly(reward) => {
                assert_eq!(reward.elapsed_secs, 600);
                assert_eq!(reward.xp_gained, 100);
                assert_eq!(reward.gold_gained, 50);
                assert_eq!(reward.minutes_credited, 10);
            }
            other => panic!("expected early stop reward, got {:?}", other),
        }
        assert_eq!(profile.xp, 100);
        assert_eq!(profile.gold, 50);
        assert_eq!(profile.total_study_minutes, 10);
        assert_eq!(profile.subject_totals["AMC Math"], 10);
        assert_eq!(profile.sessions.len(), 1);
        assert_eq!(profile.inventory_count(REST_TOKEN), 0);
        assert_eq!(profile.timer_start, None);
        assert_eq!(profile.current_subject, None);
    }

    #[test]
    fn test_stop_early_while_paused_uses_paused_time() {
        let mut profile = running(60);
        pause(&mut profile, secs(900)).unwrap();
        let outcome = stop_early(&mut profile, secs(50_000)).unwrap();
        assert_eq!(outcome.xp_gained(), 150);
        assert_eq!(outcome.gold_gained(), 75);
        assert_eq!(profile.total_study_minutes, 15);
        assert!(!profile.timer_running);
        assert_eq!(profile.paused_time, None);
    }

    #[test]
    fn test_complete_awards_full_session() {
        let mut profile = running(65);
        let outcome = complete(&mut profile, secs(65 * 60)).unwrap();
        match &outcome {
            SessionOutcome::Completed(reward) => {
                assert_eq!(reward.minutes, 65);
                assert_eq!(reward.xp_gained, 650);
                assert_eq!(reward.gold_gained, 325);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(
            outcome.message(),
            "Session recorded! You earned 650 XP and 325 gold."
        );
        assert_eq!(profile.subject_totals["AMC Math"], 65);
        assert_eq!(profile.inventory_count(REST_TOKEN), 1);
        assert_eq!(phase(&profile, secs(10_000)), TimerPhase::Idle);
    }

    #[test]
    fn test_complete_without_subject_uses_fallback() {
        let mut profile = running(30);
        profile.current_subject = None;
        assert_eq!(phase(&profile, secs(31 * 60)), TimerPhase::Expired);

        let outcome = complete(&mut profile, secs(31 * 60)).unwrap();
        assert_eq!(outcome.xp_gained(), 300);
        assert_eq!(profile.subject_totals[FALLBACK_SUBJECT], 30);
        assert_eq!(phase(&profile, secs(31 * 60)), TimerPhase::Idle);
    }

    #[test]
    fn test_complete_blank_subject_and_short_duration() {
        let mut profile = running(5);
        profile.current_subject = Some("   ".to_string());
        profile.timer_duration = Some(30);

        let outcome = complete(&mut profile, secs(30)).unwrap();
        assert_eq!(outcome.xp_gained(), 10);
        assert_eq!(profile.subject_totals[FALLBACK_SUBJECT], 1);
        assert!(!profile.timer_running);
    }

    #[test]
    fn test_stop_early_without_subject_uses_fallback() {
        let mut profile = running(30);
        profile.current_subject = None;
        stop_early(&mut profile, secs(900)).unwrap();
        assert_eq!(profile.subject_totals[FALLBACK_SUBJECT], 15);
    }

    #[test]
    fn test_resume_clamps_oversized_paused_time() {
        let mut profile = running(30);
        pause(&mut profile, secs(60)).unwrap();
        profile.paused_time = Some(u64::MAX);

        let status = resume(&mut profile, secs(120)).unwrap();
        assert_eq!(status.phase, TimerPhase::Expired);
        assert_eq!(status.elapsed_secs, 1800);
        assert_eq!(profile.timer_start, Some(secs(120 - 1800)));
        complete(&mut profile, secs(120)).unwrap();
    }

    #[test]
    fn test_restart_after_completion() {
        let mut profile = running(5);
        complete(&mut profile, secs(300)).unwrap();
        assert!(start(&mut profile, 10, "Biology", secs(301)).is_ok());
        assert_eq!(profile.current_subject.as_deref(), Some("Biology"));
    }

    #[test]
    fn test_clock_skew_counts_as_zero_elapsed() {
        let profile = running(30);
        let status = poll(&profile, t0() - Duration::seconds(30));
        assert_eq!(status.phase, TimerPhase::Running);
        assert_eq!(status.elapsed_secs, 0);
    }
}
