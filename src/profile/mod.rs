//! Player profile: the typed record, its stats, and its persistence.

pub mod names;
pub mod picture;
pub mod stats;
pub mod store;
pub mod types;

pub use names::*;
pub use stats::*;
pub use store::*;
pub use types::*;
