//! Boss raid: a one-shot, deterministic power check.

pub mod boss;

pub use boss::*;
