//! Study rewards, XP curve, stat upgrades, and history queries.

pub mod history;
pub mod logic;

pub use history::*;
pub use logic::*;
