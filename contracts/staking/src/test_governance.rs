extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env, IntoVal, String, TryIntoVal,
};

use crate::{events, ContractError, LiquidStakingContract, LiquidStakingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, LiquidStakingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let stake_token_id = stake_token.address();

    let contract_id = env.register(LiquidStakingContract, ());
    let client = LiquidStakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &stake_token_id, &500, &0, &100_000, &1_000);

    (env, client, stake_token_id)
}

/// Mint and stake enough for `user` to clear the proposal-creation threshold.
fn stake_for(env: &Env, client: &LiquidStakingContractClient, token: &Address, user: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(user, &amount);
    client.stake(user, &amount, &0);
}

fn description(env: &Env) -> String {
    String::from_str(env, "Raise the base reward rate to 6%")
}

// ── Proposal creation ─────────────────────────────────────────────────────────

#[test]
fn test_create_proposal_returns_dense_ids() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    env.ledger().set_timestamp(500);
    let first = client.create_proposal(&creator, &description(&env), &100);
    let second = client.create_proposal(&creator, &description(&env), &2_880);

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(client.get_proposal_count(), 2);

    let proposal = client.get_proposal(&first).unwrap();
    assert_eq!(proposal.id, 1);
    assert_eq!(proposal.creator, creator);
    assert_eq!(proposal.start_time, 500);
    assert_eq!(proposal.end_time, 600);
    assert!(!proposal.executed);
    assert_eq!(proposal.votes_for, 0);
    assert_eq!(proposal.votes_against, 0);
    assert_eq!(proposal.minimum_votes, 1_000_000);
}

#[test]
fn test_create_proposal_below_threshold_fails() {
    let (env, client, token) = setup();

    let small_fish = Address::generate(&env);
    stake_for(&env, &client, &token, &small_fish, 999_999);

    let result = client.try_create_proposal(&small_fish, &description(&env), &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    // Exactly at the threshold is enough.
    let whale = Address::generate(&env);
    stake_for(&env, &client, &token, &whale, 1_000_000);
    assert_eq!(client.create_proposal(&whale, &description(&env), &100), 1);
}

#[test]
fn test_create_proposal_without_portfolio_fails() {
    let (env, client, _token) = setup();

    let nobody = Address::generate(&env);
    let result = client.try_create_proposal(&nobody, &description(&env), &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}

#[test]
fn test_create_proposal_validates_description_length() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    let too_short = String::from_str(&env, "too short");
    let result = client.try_create_proposal(&creator, &too_short, &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidProtocolParameter),
        _ => unreachable!("Expected InvalidProtocolParameter error"),
    }

    let too_long = String::from_str(&env, &"x".repeat(257));
    let result = client.try_create_proposal(&creator, &too_long, &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidProtocolParameter),
        _ => unreachable!("Expected InvalidProtocolParameter error"),
    }

    // Boundary lengths are accepted.
    let min_len = String::from_str(&env, &"y".repeat(10));
    let max_len = String::from_str(&env, &"z".repeat(256));
    client.create_proposal(&creator, &min_len, &100);
    client.create_proposal(&creator, &max_len, &100);
}

#[test]
fn test_create_proposal_validates_voting_period() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    for bad in [0u64, 99, 2_881, u64::MAX] {
        let result = client.try_create_proposal(&creator, &description(&env), &bad);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidProtocolParameter),
            _ => unreachable!("Expected InvalidProtocolParameter error"),
        }
    }
}

// ── Voting ────────────────────────────────────────────────────────────────────

#[test]
fn test_vote_adds_current_voting_power() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    let voter = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);
    stake_for(&env, &client, &token, &voter, 3_000_000);

    env.ledger().set_timestamp(0);
    let id = client.create_proposal(&creator, &description(&env), &1_000);

    client.vote(&voter, &id, &true);
    client.vote(&creator, &id, &false);

    let proposal = client.get_proposal(&id).unwrap();
    assert_eq!(proposal.votes_for, 3_000_000);
    assert_eq!(proposal.votes_against, 2_000_000);
}

#[test]
fn test_repeat_votes_accumulate() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    env.ledger().set_timestamp(0);
    let id = client.create_proposal(&creator, &description(&env), &1_000);

    // No dedup: the same caller can vote again, and a stake between calls
    // changes the weight that gets added.
    client.vote(&creator, &id, &true);
    stake_for(&env, &client, &token, &creator, 1_000_000);
    client.vote(&creator, &id, &true);

    let proposal = client.get_proposal(&id).unwrap();
    assert_eq!(proposal.votes_for, 2_000_000 + 3_000_000);
}

#[test]
fn test_vote_after_end_time_fails() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    env.ledger().set_timestamp(0);
    let id = client.create_proposal(&creator, &description(&env), &100);

    env.ledger().set_timestamp(100); // end_time is exclusive
    let result = client.try_vote(&creator, &id, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::VotingClosed),
        _ => unreachable!("Expected VotingClosed error"),
    }
}

#[test]
fn test_vote_invalid_proposal_id_fails() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);
    client.create_proposal(&creator, &description(&env), &1_000);

    for bad in [0u64, 2, u64::MAX] {
        let result = client.try_vote(&creator, &bad, &true);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidProtocolParameter),
            _ => unreachable!("Expected InvalidProtocolParameter error"),
        }
    }
}

#[test]
fn test_vote_without_portfolio_fails() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);
    let id = client.create_proposal(&creator, &description(&env), &1_000);

    let nobody = Address::generate(&env);
    let result = client.try_vote(&nobody, &id, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

#[test]
fn test_create_proposal_publishes_event() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    env.ledger().set_timestamp(500);
    let id = client.create_proposal(&creator, &description(&env), &1_000);

    let (contract, topics, data) = crate::test::last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        topics,
        (symbol_short!("PROP_NEW"), creator.clone()).into_val(&env)
    );
    let payload: events::ProposalCreatedEvent = data.try_into_val(&env).unwrap();
    assert_eq!(payload.proposal_id, id);
    assert_eq!(payload.creator, creator);
    assert_eq!(payload.end_time, 1_500);
    assert_eq!(payload.timestamp, 500);
}

#[test]
fn test_vote_publishes_event() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);

    env.ledger().set_timestamp(0);
    let id = client.create_proposal(&creator, &description(&env), &1_000);

    client.vote(&creator, &id, &false);

    let (contract, topics, data) = crate::test::last_event(&env);
    assert_eq!(contract, client.address);
    assert_eq!(
        topics,
        (symbol_short!("VOTE"), creator.clone()).into_val(&env)
    );
    let payload: events::VoteCastEvent = data.try_into_val(&env).unwrap();
    assert_eq!(payload.proposal_id, id);
    assert_eq!(payload.voter, creator);
    assert!(!payload.support);
    assert_eq!(payload.weight, 2_000_000);
}

#[test]
fn test_voting_power_drops_after_full_unstake() {
    let (env, client, token) = setup();

    let creator = Address::generate(&env);
    let voter = Address::generate(&env);
    stake_for(&env, &client, &token, &creator, 2_000_000);
    stake_for(&env, &client, &token, &voter, 2_000_000);

    env.ledger().set_timestamp(0);
    let id = client.create_proposal(&creator, &description(&env), &2_880);

    client.initiate_unstake(&voter, &2_000_000);
    env.ledger().set_timestamp(1_000);
    client.complete_unstake(&voter);

    // The portfolio survives with zero weight, so the vote lands but adds
    // nothing to the tally.
    client.vote(&voter, &id, &true);
    let proposal = client.get_proposal(&id).unwrap();
    assert_eq!(proposal.votes_for, 0);
}
