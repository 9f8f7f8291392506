//! Raydium AMM v4 account layouts.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::core::field_extractor::{AccountLayout, PoolField};

/// `initialize2` of the Raydium liquidity pool v4 program.
pub const AMM_V4_INITIALIZE2: AccountLayout = AccountLayout {
    name: "raydium-amm-v4",
    version: "initialize2",
    offsets: &[
        (PoolField::ProgramId, 0),
        (PoolField::AmmId, 4),
        (PoolField::AmmAuthority, 5),
        (PoolField::AmmOpenOrders, 6),
        (PoolField::LpMint, 7),
        (PoolField::BaseMint, 8),
        (PoolField::QuoteMint, 9),
        (PoolField::BaseVault, 10),
        (PoolField::QuoteVault, 11),
        (PoolField::AmmTargetOrders, 13),
        (PoolField::Deployer, 17),
    ],
};

static LAYOUTS: Lazy<HashMap<String, AccountLayout>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(AMM_V4_INITIALIZE2.to_string(), AMM_V4_INITIALIZE2);
    map
});

/// Look a layout up by its `name/version` tag.
pub fn layout(tag: &str) -> Option<AccountLayout> {
    LAYOUTS.get(tag).copied()
}
