//! Merchant: consumable purchases and loot sell-back.

use crate::core::constants::{FOCUS_POTION, FREE_TIME_PASS, REST_TOKEN, SELL_PRICE};
use crate::core::error::{EngineError, Result};
use crate::profile::Profile;
use tracing::info;

/// Consumables the merchant stocks, with prices in gold.
pub const SHOP_CATALOG: [(&str, u64); 3] =
    [(FREE_TIME_PASS, 100), (REST_TOKEN, 75), (FOCUS_POTION, 50)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub item: String,
    pub price: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub item: String,
    pub gold_gained: u64,
    pub remaining: u32,
    pub message: String,
}

fn catalog_entry(item: &str) -> Option<(&'static str, u64)> {
    SHOP_CATALOG
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(item.trim()))
        .copied()
}

pub fn catalog_price(item: &str) -> Option<u64> {
    catalog_entry(item).map(|(_, price)| price)
}

/// Debits `price` gold and adds one `item` to the inventory.
pub fn purchase(profile: &mut Profile, item: &str, price: u64) -> Result<Purchase> {
    let item = item.trim();
    if item.is_empty() {
        return Err(EngineError::invalid("item name cannot be empty"));
    }
    if profile.gold < price {
        return Err(EngineError::InsufficientFunds {
            needed: price,
            available: profile.gold,
        });
    }

    profile.gold -= price;
    profile.add_inventory(item, 1);
    info!(item, price, gold = profile.gold, "purchase");

    Ok(Purchase {
        item: item.to_string(),
        price,
        message: format!("Purchased {}!", item),
    })
}

/// Buys a catalog item at its listed price.
pub fn buy_from_shop(profile: &mut Profile, item: &str) -> Result<Purchase> {
    let (name, price) = catalog_entry(item)
        .ok_or_else(|| EngineError::invalid(format!("the shop does not sell '{}'", item.trim())))?;
    purchase(profile, name, price)
}

/// Sells one owned loot item back for `SELL_PRICE` gold.
pub fn sell_item(profile: &mut Profile, item: &str) -> Result<Sale> {
    let quantity = match profile.items.get_mut(item) {
        Some(q) if *q > 0 => q,
        _ => return Err(EngineError::NotOwned(item.to_string())),
    };

    *quantity -= 1;
    let remaining = *quantity;
    profile.gold = profile.gold.saturating_add(SELL_PRICE);
    info!(item, remaining, "item sold");

    Ok(Sale {
        item: item.to_string(),
        gold_gained: SELL_PRICE,
        remaining,
        message: format!("Sold one {} for {} gold.", item, SELL_PRICE),
    })
}
