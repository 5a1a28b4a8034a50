//! Cerebria - study-session progression engine.
//!
//! Turns timed study sessions into XP, gold and loot for a single persisted
//! player profile. The presentation layer drives everything through
//! [`StudyEngine`]; the modules below expose the same rules as plain
//! functions over [`Profile`].

pub mod core;
pub mod economy;
pub mod encounter;
pub mod profile;
pub mod progression;
pub mod timer;

pub use crate::core::context::StudyEngine;
pub use crate::core::error::{EngineError, Result};
pub use crate::profile::{PlayerClass, Profile, ProfileStore, StatType, Stats};
pub use crate::timer::{SessionOutcome, TimerPhase, TimerStatus};
