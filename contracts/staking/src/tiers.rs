//! Stake-tier classification and lock-period bonuses.
//!
//! Both classifiers are pure and total: every amount maps to a tier (the
//! floor is Silver) and every period maps to a multiplier. Multipliers are
//! basis-point style, 100 = 1.0x.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

// ── Tier thresholds and multipliers ─────────────────────────────────────────

pub const SILVER_LEVEL: u32 = 1;
pub const GOLD_LEVEL: u32 = 2;
pub const DIAMOND_LEVEL: u32 = 3;

pub const GOLD_MIN_STAKE: i128 = 5_000_000;
pub const DIAMOND_MIN_STAKE: i128 = 10_000_000;

pub const SILVER_MULTIPLIER: i128 = 100;
pub const GOLD_MULTIPLIER: i128 = 150;
pub const DIAMOND_MULTIPLIER: i128 = 200;

// ── Lock periods (ledger time units) ────────────────────────────────────────

pub const LOCK_NONE: u64 = 0;
pub const LOCK_SHORT: u64 = 4_320;
pub const LOCK_LONG: u64 = 8_640;

pub const LOCK_NONE_MULTIPLIER: i128 = 100;
pub const LOCK_SHORT_MULTIPLIER: i128 = 125;
pub const LOCK_LONG_MULTIPLIER: i128 = 150;

/// Width of the per-tier feature bitmap.
pub const FEATURE_FLAG_WIDTH: u32 = 10;

const TIER_LEVEL_KEY: Symbol = symbol_short!("TIER_LVL");

/// Per-tier configuration written once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierLevel {
    pub minimum_stake: i128,
    pub reward_multiplier: i128,
    pub enabled_features: Vec<bool>,
}

/// Map a cumulative staked total to `(tier_level, reward_multiplier)`.
pub fn classify(total_staked: i128) -> (u32, i128) {
    if total_staked >= DIAMOND_MIN_STAKE {
        (DIAMOND_LEVEL, DIAMOND_MULTIPLIER)
    } else if total_staked >= GOLD_MIN_STAKE {
        (GOLD_LEVEL, GOLD_MULTIPLIER)
    } else {
        (SILVER_LEVEL, SILVER_MULTIPLIER)
    }
}

/// Time-bonus multiplier for a lock-period selection.
pub fn lock_multiplier(lock_period: u64) -> i128 {
    if lock_period >= LOCK_LONG {
        LOCK_LONG_MULTIPLIER
    } else if lock_period >= LOCK_SHORT {
        LOCK_SHORT_MULTIPLIER
    } else {
        LOCK_NONE_MULTIPLIER
    }
}

/// Only the three canonical lock periods are accepted at the call boundary.
pub fn is_valid_lock_period(lock_period: u64) -> bool {
    matches!(lock_period, LOCK_NONE | LOCK_SHORT | LOCK_LONG)
}

// ── Tier table ──────────────────────────────────────────────────────────────

/// Write the three fixed tier records. Called once from `initialize`;
/// no update operation exists afterwards.
pub fn seed_tier_table(env: &Env) {
    store_tier(env, SILVER_LEVEL, 0, SILVER_MULTIPLIER, 3);
    store_tier(env, GOLD_LEVEL, GOLD_MIN_STAKE, GOLD_MULTIPLIER, 6);
    store_tier(
        env,
        DIAMOND_LEVEL,
        DIAMOND_MIN_STAKE,
        DIAMOND_MULTIPLIER,
        FEATURE_FLAG_WIDTH,
    );
}

pub fn get_tier(env: &Env, level: u32) -> Option<TierLevel> {
    env.storage().persistent().get(&(TIER_LEVEL_KEY, level))
}

fn store_tier(env: &Env, level: u32, minimum_stake: i128, reward_multiplier: i128, enabled: u32) {
    let mut features = Vec::new(env);
    for i in 0..FEATURE_FLAG_WIDTH {
        features.push_back(i < enabled);
    }
    let tier = TierLevel {
        minimum_stake,
        reward_multiplier,
        enabled_features: features,
    };
    env.storage().persistent().set(&(TIER_LEVEL_KEY, level), &tier);
}

// ── Tests ───────────────────────────────────────────────────────────────────
