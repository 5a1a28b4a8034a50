//! The engine context handed to the presentation layer.
//!
//! `StudyEngine` owns the profile, the store it persists to, a clock and an
//! RNG. Every mutating operation runs against the in-memory profile and is
//! then saved; if the save fails the in-memory profile is rolled back so it
//! never drifts from what is on disk.

use super::error::{EngineError, Result};
use crate::economy::{self, GachaPull, Purchase, Sale};
use crate::encounter::{self, RaidOutcome};
use crate::profile::{validate_name, PlayerClass, Profile, ProfileStore};
use crate::progression::{self, LevelUp, StudyReward, WEEK_DAYS};
use crate::timer::{self, SessionOutcome, TimerStatus};
use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct StudyEngine<R: Rng = StdRng> {
    profile: Profile,
    store: ProfileStore,
    rng: R,
    clock: Clock,
}

impl StudyEngine<StdRng> {
    /// Opens the profile at the default save location.
    pub fn open_default() -> Result<Self> {
        Self::open(ProfileStore::new()?)
    }

    /// Loads the profile from `store`, creating a new-game profile if none is usable.
    pub fn open(store: ProfileStore) -> Result<Self> {
        Self::open_with_rng(store, StdRng::from_entropy())
    }
}

impl<R: Rng> StudyEngine<R> {
    pub fn open_with_rng(store: ProfileStore, rng: R) -> Result<Self> {
        let profile = store.load_or_create()?;
        info!(name = %profile.name, level = profile.level, "profile opened");
        Ok(Self {
            profile,
            store,
            rng,
            clock: Box::new(Utc::now),
        })
    }

    /// Replaces the wall clock, e.g. with a fixed time in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.profile)
    }

    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut Profile, &mut R, DateTime<Utc>) -> Result<T>,
    ) -> Result<T> {
        let now = self.now();
        let snapshot = self.profile.clone();
        let value = op(&mut self.profile, &mut self.rng, now)?;
        if let Err(e) = self.store.save(&self.profile) {
            warn!(error = %e, "save failed, rolling back in-memory profile");
            self.profile = snapshot;
            return Err(e);
        }
        Ok(value)
    }

    /// Replaces the profile with a fresh new-game one.
    pub fn reset(&mut self, name: &str, class: PlayerClass) -> Result<()> {
        validate_name(name).map_err(EngineError::InvalidArgument)?;
        let name = name.trim().to_string();
        self.apply(|profile, _, _| {
            *profile = Profile::new(name, class);
            Ok(())
        })
    }

    pub fn set_picture(&mut self, picture: Option<Vec<u8>>) -> Result<()> {
        self.apply(|profile, _, _| {
            profile.picture = picture;
            Ok(())
        })
    }

    pub fn start_timer(&mut self, minutes: u32, subject: &str) -> Result<TimerStatus> {
        self.apply(|profile, _, now| timer::start(profile, minutes, subject, now))
    }

    pub fn pause_timer(&mut self) -> Result<TimerStatus> {
        self.apply(|profile, _, now| timer::pause(profile, now))
    }

    pub fn resume_timer(&mut self) -> Result<TimerStatus> {
        self.apply(|profile, _, now| timer::resume(profile, now))
    }

    /// Re-evaluates the timer. Read-only; nothing is persisted.
    pub fn poll_timer(&self) -> TimerStatus {
        timer::poll(&self.profile, self.now())
    }

    pub fn stop_early(&mut self) -> Result<SessionOutcome> {
        self.apply(|profile, _, now| timer::stop_early(profile, now))
    }

    pub fn complete_session(&mut self) -> Result<SessionOutcome> {
        self.apply(|profile, _, now| timer::complete(profile, now))
    }

    pub fn award_study(&mut self, minutes: u64, subject: &str) -> Result<StudyReward> {
        self.apply(|profile, _, now| progression::award_study(profile, minutes, subject, now))
    }

    pub fn add_xp(&mut self, amount: u64) -> Result<LevelUp> {
        self.apply(|profile, _, _| Ok(progression::add_xp(profile, amount)))
    }

    pub fn upgrade_stat(&mut self, stat_name: &str) -> Result<u32> {
        self.apply(|profile, _, _| progression::upgrade_stat(profile, stat_name))
    }

    /// Minutes per day for the week ending today.
    pub fn weekly_series(&self) -> [(NaiveDate, u64); WEEK_DAYS] {
        progression::weekly_series(&self.profile, self.now().date_naive())
    }

    pub fn known_subjects(&self) -> Vec<String> {
        progression::known_subjects(&self.profile)
    }

    pub fn gacha_spin(&mut self) -> Result<GachaPull> {
        self.apply(|profile, rng, _| economy::gacha_spin(profile, rng))
    }

    pub fn sell_item(&mut self, item: &str) -> Result<Sale> {
        self.apply(|profile, _, _| economy::sell_item(profile, item))
    }

    pub fn purchase(&mut self, item: &str, price: u64) -> Result<Purchase> {
        self.apply(|profile, _, _| economy::purchase(profile, item, price))
    }

    pub fn buy_from_shop(&mut self, item: &str) -> Result<Purchase> {
        self.apply(|profile, _, _| economy::buy_from_shop(profile, item))
    }

    pub fn boss_raid(&mut self) -> Result<RaidOutcome> {
        self.apply(|profile, _, _| Ok(encounter::boss_raid(profile)))
    }
}
