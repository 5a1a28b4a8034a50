//! Gold sinks and sources: gacha pulls, the shop, and item sell-back.

pub mod gacha;
pub mod shop;

pub use gacha::*;
pub use shop::*;
