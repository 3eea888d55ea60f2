#![no_std]

pub mod events;
pub mod governance;
pub mod pause;
pub mod rewards;
pub mod tiers;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, String, Symbol,
};

use governance::Proposal;
use tiers::TierLevel;

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const POOL_TOTAL: Symbol = symbol_short!("POOL_TOT");
const BASE_REWARD_RATE: Symbol = symbol_short!("BASE_RATE");
const BONUS_RATE: Symbol = symbol_short!("BONUS_RT");
const MINIMUM_STAKE: Symbol = symbol_short!("MIN_STK");
const COOLDOWN_PERIOD: Symbol = symbol_short!("COOL_PER");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const POSITION: Symbol = symbol_short!("POS");
const PORTFOLIO: Symbol = symbol_short!("PORT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    InvalidProtocolParameter = 4,
    InvalidAmount = 5,
    InsufficientStake = 6,
    CooldownActive = 7,
    CooldownAlreadyActive = 8,
    NoStakeFound = 9,
    NoPortfolioFound = 10,
    BelowMinimum = 11,
    Paused = 12,
    ArithmeticOverflow = 13,
    VotingClosed = 14,
}

// ── Core records ─────────────────────────────────────────────────────────────

/// A user's staking record. Replaced wholesale on every `stake` call and
/// removed entirely on a completed withdrawal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPosition {
    pub amount: i128,
    pub start_time: u64,
    pub last_claim_time: u64,
    pub lock_period: u64,
    pub cooldown_start: Option<u64>,
    pub accumulated_rewards: i128,
}

/// Aggregated portfolio view for a user. Created with zero defaults on first
/// stake and never deleted. The collateral/debt/health fields are carried for
/// the wider protocol surface; staking logic does not read them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub total_collateral: i128,
    pub total_debt: i128,
    pub health_factor: i128,
    pub last_updated: u64,
    pub staked_total: i128,
    pub analytics_tokens: i128,
    pub voting_power: i128,
    pub tier_level: u32,
    pub rewards_multiplier: i128,
}

impl UserPosition {
    fn empty() -> Self {
        UserPosition {
            total_collateral: 0,
            total_debt: 0,
            health_factor: 0,
            last_updated: 0,
            staked_total: 0,
            analytics_tokens: 0,
            voting_power: 0,
            tier_level: tiers::SILVER_LEVEL,
            rewards_multiplier: 0,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LiquidStakingContract;

#[contractimpl]
impl LiquidStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`      – SAC address of the staked base asset.
    /// * `base_reward_rate` – annual rate, x100 (100 = 1%).
    /// * `bonus_rate`       – reserved rate parameter, x100.
    /// * `minimum_stake`    – smallest accepted stake amount.
    /// * `cooldown_period`  – time units between `initiate_unstake` and
    ///   `complete_unstake`.
    pub fn initialize(
        env: Env,
        owner: Address,
        stake_token: Address,
        base_reward_rate: i128,
        bonus_rate: i128,
        minimum_stake: i128,
        cooldown_period: u64,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if base_reward_rate < 0 || bonus_rate < 0 || minimum_stake <= 0 {
            return Err(ContractError::InvalidProtocolParameter);
        }

        owner.require_auth();

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&BASE_REWARD_RATE, &base_reward_rate);
        env.storage().instance().set(&BONUS_RATE, &bonus_rate);
        env.storage().instance().set(&MINIMUM_STAKE, &minimum_stake);
        env.storage().instance().set(&COOLDOWN_PERIOD, &cooldown_period);
        // POOL_TOTAL and the proposal counter start at zero; unwrap_or(0)
        // handles absent keys, so no explicit init needed.

        pause::set_paused(&env, false);
        pause::set_emergency_mode(&env, false);
        tiers::seed_tier_table(&env);

        events::publish_initialized(
            &env,
            owner,
            stake_token,
            base_reward_rate,
            minimum_stake,
            cooldown_period,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the base asset with a lock-period selection.
    ///
    /// Re-staking replaces the position record outright (fresh timestamps,
    /// cooldown cleared, accumulated rewards reset) while the portfolio keeps
    /// the cumulative staked total. Tier and lock multipliers are recomputed
    /// on the cumulative total at every call.
    pub fn stake(
        env: Env,
        staker: Address,
        amount: i128,
        lock_period: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if !tiers::is_valid_lock_period(lock_period) {
            return Err(ContractError::InvalidProtocolParameter);
        }
        pause::require_not_paused(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let minimum_stake: i128 = env.storage().instance().get(&MINIMUM_STAKE).unwrap_or(0);
        if amount < minimum_stake {
            return Err(ContractError::BelowMinimum);
        }

        // Pull the deposit into protocol custody. A failed transfer traps and
        // aborts the whole transaction, so no state below is reachable.
        let stake_token: Address = env
            .storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        token::Client::new(&env, &stake_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let now = env.ledger().timestamp();

        let mut portfolio: UserPosition = env
            .storage()
            .persistent()
            .get(&(PORTFOLIO, staker.clone()))
            .unwrap_or_else(UserPosition::empty);

        let new_total = portfolio
            .staked_total
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let (tier_level, tier_multiplier) = tiers::classify(new_total);
        let lock_multiplier = tiers::lock_multiplier(lock_period);
        let rewards_multiplier = tier_multiplier
            .checked_mul(lock_multiplier)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let position = StakingPosition {
            amount,
            start_time: now,
            last_claim_time: now,
            lock_period,
            cooldown_start: None,
            accumulated_rewards: 0,
        };
        env.storage()
            .persistent()
            .set(&(POSITION, staker.clone()), &position);

        portfolio.staked_total = new_total;
        portfolio.tier_level = tier_level;
        portfolio.rewards_multiplier = rewards_multiplier;
        portfolio.voting_power = new_total;
        portfolio.last_updated = now;
        env.storage()
            .persistent()
            .set(&(PORTFOLIO, staker.clone()), &portfolio);

        let prev_pool: i128 = env.storage().instance().get(&POOL_TOTAL).unwrap_or(0);
        let new_pool = prev_pool
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&POOL_TOTAL, &new_pool);

        events::publish_staked(
            &env,
            staker,
            amount,
            lock_period,
            tier_level,
            rewards_multiplier,
            new_pool,
        );

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Start the withdrawal cooldown.
    ///
    /// The cooldown covers the whole position; `amount` only gates
    /// sufficiency against the recorded position amount.
    pub fn initiate_unstake(
        env: Env,
        staker: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut position: StakingPosition = env
            .storage()
            .persistent()
            .get(&(POSITION, staker.clone()))
            .ok_or(ContractError::NoStakeFound)?;

        if position.amount < amount {
            return Err(ContractError::InsufficientStake);
        }
        if position.cooldown_start.is_some() {
            return Err(ContractError::CooldownAlreadyActive);
        }

        position.cooldown_start = Some(env.ledger().timestamp());
        env.storage()
            .persistent()
            .set(&(POSITION, staker.clone()), &position);

        events::publish_cooldown_started(&env, staker, position.amount);

        Ok(())
    }

    /// Withdraw the full position once the cooldown has elapsed.
    ///
    /// Deletes the position, returns the staked amount, and reduces both the
    /// pool total and the portfolio's cumulative staked total. The portfolio
    /// record itself survives; tier and multiplier keep their last computed
    /// values until the next stake.
    pub fn complete_unstake(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let position: StakingPosition = env
            .storage()
            .persistent()
            .get(&(POSITION, staker.clone()))
            .ok_or(ContractError::NoStakeFound)?;

        let cooldown_start = position
            .cooldown_start
            .ok_or(ContractError::NotAuthorized)?;

        let now = env.ledger().timestamp();
        let cooldown_period: u64 = env.storage().instance().get(&COOLDOWN_PERIOD).unwrap_or(0);
        if now.saturating_sub(cooldown_start) < cooldown_period {
            return Err(ContractError::CooldownActive);
        }

        // Remove the position before the transfer (checks-effects-interactions).
        env.storage()
            .persistent()
            .remove(&(POSITION, staker.clone()));

        let mut portfolio: UserPosition = env
            .storage()
            .persistent()
            .get(&(PORTFOLIO, staker.clone()))
            .ok_or(ContractError::NoPortfolioFound)?;
        portfolio.staked_total = portfolio.staked_total.saturating_sub(position.amount);
        portfolio.voting_power = portfolio.staked_total;
        portfolio.last_updated = now;
        env.storage()
            .persistent()
            .set(&(PORTFOLIO, staker.clone()), &portfolio);

        let prev_pool: i128 = env.storage().instance().get(&POOL_TOTAL).unwrap_or(0);
        let new_pool = prev_pool.saturating_sub(position.amount);
        env.storage().instance().set(&POOL_TOTAL, &new_pool);

        let stake_token: Address = env
            .storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        token::Client::new(&env, &stake_token).transfer(
            &env.current_contract_address(),
            &staker,
            &position.amount,
        );

        events::publish_unstaked(&env, staker, position.amount, new_pool);

        Ok(position.amount)
    }

    // ── Governance ──────────────────────────────────────────────────────────

    /// Create a proposal. Requires an existing portfolio with voting power at
    /// or above the creation threshold. Returns the new proposal id.
    pub fn create_proposal(
        env: Env,
        creator: Address,
        description: String,
        voting_period: u64,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        creator.require_auth();

        let portfolio: UserPosition = env
            .storage()
            .persistent()
            .get(&(PORTFOLIO, creator.clone()))
            .ok_or(ContractError::NotAuthorized)?;
        if portfolio.voting_power < governance::PROPOSAL_THRESHOLD {
            return Err(ContractError::NotAuthorized);
        }

        let len = description.len();
        if len < governance::MIN_DESCRIPTION_LEN || len > governance::MAX_DESCRIPTION_LEN {
            return Err(ContractError::InvalidProtocolParameter);
        }
        if voting_period < governance::MIN_VOTING_PERIOD
            || voting_period > governance::MAX_VOTING_PERIOD
        {
            return Err(ContractError::InvalidProtocolParameter);
        }

        let now = env.ledger().timestamp();
        let proposal_id = governance::next_proposal_id(&env);
        let proposal = Proposal {
            id: proposal_id,
            creator: creator.clone(),
            description,
            start_time: now,
            end_time: now.saturating_add(voting_period),
            executed: false,
            votes_for: 0,
            votes_against: 0,
            minimum_votes: governance::MINIMUM_VOTES,
        };
        governance::store_proposal(&env, &proposal);

        events::publish_proposal_created(&env, proposal_id, creator, proposal.end_time);

        Ok(proposal_id)
    }

    /// Cast a vote weighted by the caller's current voting power.
    ///
    /// Repeat votes are not deduplicated; each call adds the caller's
    /// current weight again.
    pub fn vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        if proposal_id == 0 || proposal_id > governance::proposal_count(&env) {
            return Err(ContractError::InvalidProtocolParameter);
        }
        let mut proposal = governance::get_proposal(&env, proposal_id)
            .ok_or(ContractError::InvalidProtocolParameter)?;

        if env.ledger().timestamp() >= proposal.end_time {
            return Err(ContractError::VotingClosed);
        }

        let portfolio: UserPosition = env
            .storage()
            .persistent()
            .get(&(PORTFOLIO, voter.clone()))
            .ok_or(ContractError::NotAuthorized)?;

        let weight = portfolio.voting_power;
        if support {
            proposal.votes_for = proposal
                .votes_for
                .checked_add(weight)
                .ok_or(ContractError::ArithmeticOverflow)?;
        } else {
            proposal.votes_against = proposal
                .votes_against
                .checked_add(weight)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        governance::store_proposal(&env, &proposal);

        events::publish_vote_cast(&env, proposal_id, voter, support, weight);

        Ok(())
    }

    // ── Admin ───────────────────────────────────────────────────────────────

    /// Halt staking. Only the owner may call this. Unstaking and governance
    /// remain available while paused.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        pause::set_paused(&env, true);
        events::publish_pause_toggled(&env, caller, true);

        Ok(())
    }

    /// Resume staking. Only the owner may call this.
    pub fn resume(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        pause::set_paused(&env, false);
        events::publish_pause_toggled(&env, caller, false);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    /// Sum of all currently staked amounts.
    pub fn get_pool_total(env: Env) -> i128 {
        env.storage().instance().get(&POOL_TOTAL).unwrap_or(0)
    }

    pub fn get_proposal_count(env: Env) -> u64 {
        governance::proposal_count(&env)
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Option<Proposal> {
        governance::get_proposal(&env, proposal_id)
    }

    pub fn get_staking_position(env: Env, user: Address) -> Option<StakingPosition> {
        env.storage().persistent().get(&(POSITION, user))
    }

    pub fn get_user_position(env: Env, user: Address) -> Option<UserPosition> {
        env.storage().persistent().get(&(PORTFOLIO, user))
    }

    /// Rewards accrued by `user` since the position's last claim point,
    /// on top of any already-accumulated balance. Read-only.
    pub fn get_pending_rewards(env: Env, user: Address) -> Result<i128, ContractError> {
        let position: StakingPosition = env
            .storage()
            .persistent()
            .get(&(POSITION, user.clone()))
            .ok_or(ContractError::NoStakeFound)?;
        let portfolio: UserPosition = env
            .storage()
            .persistent()
            .get(&(PORTFOLIO, user))
            .ok_or(ContractError::NoPortfolioFound)?;

        let base_rate: i128 = env.storage().instance().get(&BASE_REWARD_RATE).unwrap_or(0);
        let elapsed = env
            .ledger()
            .timestamp()
            .saturating_sub(position.last_claim_time);

        let accrued = rewards::accrued(
            position.amount,
            base_rate,
            portfolio.rewards_multiplier,
            elapsed,
        )?;
        position
            .accumulated_rewards
            .checked_add(accrued)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn get_tier_level(env: Env, level: u32) -> Option<TierLevel> {
        tiers::get_tier(&env, level)
    }

    pub fn get_minimum_stake(env: Env) -> i128 {
        env.storage().instance().get(&MINIMUM_STAKE).unwrap_or(0)
    }

    pub fn get_cooldown_period(env: Env) -> u64 {
        env.storage().instance().get(&COOLDOWN_PERIOD).unwrap_or(0)
    }

    pub fn get_base_reward_rate(env: Env) -> i128 {
        env.storage().instance().get(&BASE_REWARD_RATE).unwrap_or(0)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    pub fn is_emergency_mode(env: Env) -> bool {
        pause::is_emergency_mode(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_governance;
