//! Balance constants, the error type, and the engine context.

pub mod constants;
pub mod context;
pub mod error;

pub use constants::*;
pub use context::*;
pub use error::*;
