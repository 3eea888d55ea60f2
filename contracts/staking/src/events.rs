#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub stake_token: Address,
    pub base_reward_rate: i128,
    pub minimum_stake: i128,
    pub cooldown_period: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub lock_period: u64,
    pub tier_level: u32,
    pub rewards_multiplier: i128,
    pub new_pool_total: i128,
    pub timestamp: u64,
}

/// Fired when a user starts the unstake cooldown.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownStartedEvent {
    pub staker: Address,
    pub position_amount: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws after the cooldown expires.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_pool_total: i128,
    pub timestamp: u64,
}

/// Fired when a proposal is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreatedEvent {
    pub proposal_id: u64,
    pub creator: Address,
    pub end_time: u64,
    pub timestamp: u64,
}

/// Fired when a vote is cast.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub proposal_id: u64,
    pub voter: Address,
    pub support: bool,
    pub weight: i128,
    pub timestamp: u64,
}

/// Fired when the owner pauses or resumes the protocol.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEvent {
    pub owner: Address,
    pub paused: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    stake_token: Address,
    base_reward_rate: i128,
    minimum_stake: i128,
    cooldown_period: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            stake_token,
            base_reward_rate,
            minimum_stake,
            cooldown_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    amount: i128,
    lock_period: u64,
    tier_level: u32,
    rewards_multiplier: i128,
    new_pool_total: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            lock_period,
            tier_level,
            rewards_multiplier,
            new_pool_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_cooldown_started(env: &Env, staker: Address, position_amount: i128) {
    env.events().publish(
        (symbol_short!("COOLDOWN"), staker.clone()),
        CooldownStartedEvent {
            staker,
            position_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, new_pool_total: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            new_pool_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_proposal_created(env: &Env, proposal_id: u64, creator: Address, end_time: u64) {
    env.events().publish(
        (symbol_short!("PROP_NEW"), creator.clone()),
        ProposalCreatedEvent {
            proposal_id,
            creator,
            end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vote_cast(env: &Env, proposal_id: u64, voter: Address, support: bool, weight: i128) {
    env.events().publish(
        (symbol_short!("VOTE"), voter.clone()),
        VoteCastEvent {
            proposal_id,
            voter,
            support,
            weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_toggled(env: &Env, owner: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE"),),
        PauseToggledEvent {
            owner,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}
