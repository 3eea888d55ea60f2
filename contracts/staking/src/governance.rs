//! Proposal records and their storage helpers.
//!
//! Proposal ids are dense and start at 1; `vote` is only valid for ids in
//! `1..=proposal_count` and before `end_time`. The `executed` flag is part of
//! the record but no operation in this contract sets it — resolution is a
//! deliberately unimplemented extension point.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

const PROPOSAL: Symbol = symbol_short!("PROP");
const PROPOSAL_COUNT: Symbol = symbol_short!("PROP_CNT");

/// Voting power required to create a proposal.
pub const PROPOSAL_THRESHOLD: i128 = 1_000_000;

/// Quorum recorded on every proposal at creation.
pub const MINIMUM_VOTES: i128 = 1_000_000;

pub const MIN_DESCRIPTION_LEN: u32 = 10;
pub const MAX_DESCRIPTION_LEN: u32 = 256;

pub const MIN_VOTING_PERIOD: u64 = 100;
pub const MAX_VOTING_PERIOD: u64 = 2_880;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub creator: Address,
    pub description: String,
    pub start_time: u64,
    pub end_time: u64,
    pub executed: bool,
    pub votes_for: i128,
    pub votes_against: i128,
    pub minimum_votes: i128,
}

/// Allocate the next proposal id and advance the counter.
pub fn next_proposal_id(env: &Env) -> u64 {
    let next = proposal_count(env).saturating_add(1);
    env.storage().instance().set(&PROPOSAL_COUNT, &next);
    next
}

pub fn proposal_count(env: &Env) -> u64 {
    env.storage().instance().get(&PROPOSAL_COUNT).unwrap_or(0)
}

pub fn store_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&(PROPOSAL, proposal.id), proposal);
}

pub fn get_proposal(env: &Env, proposal_id: u64) -> Option<Proposal> {
    env.storage().persistent().get(&(PROPOSAL, proposal_id))
}
