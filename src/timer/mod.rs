//! Study-session timer state machine.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
