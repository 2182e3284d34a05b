#![cfg(test)]

use soroban_sdk::{
    testutils::{Address as _, Events as _, Ledger as _},
    Address, Env, String,
};

use crate::{ShareToken, ShareTokenClient, ShareTokenError};

fn setup<'a>() -> (Env, ShareTokenClient<'a>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let client = ShareTokenClient::new(&env, &env.register_contract(None, ShareToken));
    client.initialize(
        &admin,
        &7,
        &String::from_str(&env, "Stable Pool Share"),
        &String::from_str(&env, "SPS"),
    );
    (env, client, admin)
}

#[test]
fn initialize_stores_metadata() {
    let (env, client, admin) = setup();

    assert_eq!(client.decimals(), 7);
    assert_eq!(client.name(), String::from_str(&env, "Stable Pool Share"));
    assert_eq!(client.symbol(), String::from_str(&env, "SPS"));
    assert_eq!(client.admin(), admin);
    assert_eq!(client.total_supply(), 0);
}

#[test]
fn second_initialize_is_rejected() {
    let (env, client, _) = setup();

    let result = client.try_initialize(
        &Address::generate(&env),
        &7,
        &String::from_str(&env, "Other"),
        &String::from_str(&env, "OTH"),
    );
    assert_eq!(result, Err(Ok(ShareTokenError::AlreadyInitialized)));
}

#[test]
fn mint_and_burn_track_supply() {
    let (env, client, _) = setup();
    let holder = Address::generate(&env);

    client.mint(&holder, &1_000);
    assert_eq!(client.balance(&holder), 1_000);
    assert_eq!(client.total_supply(), 1_000);

    client.burn(&holder, &400);
    assert_eq!(client.balance(&holder), 600);
    assert_eq!(client.total_supply(), 600);
}

#[test]
fn mint_emits_event() {
    let (env, client, _) = setup();
    let holder = Address::generate(&env);

    client.mint(&holder, &1_000);
    assert_eq!(env.events().all().len(), 1, "expected exactly one mint event");
}

#[test]
fn burn_more_than_balance_fails() {
    let (env, client, _) = setup();
    let holder = Address::generate(&env);

    client.mint(&holder, &100);
    let result = client.try_burn(&holder, &101);
    assert_eq!(result, Err(Ok(ShareTokenError::InsufficientBalance)));
    assert_eq!(client.total_supply(), 100);
}

#[test]
fn negative_amount_is_rejected() {
    let (env, client, _) = setup();
    let holder = Address::generate(&env);

    assert_eq!(client.try_mint(&holder, &-1), Err(Ok(ShareTokenError::InvalidAmount)));
}

#[test]
fn transfer_moves_balance() {
    let (env, client, _) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    client.mint(&alice, &500);
    client.transfer(&alice, &bob, &200);

    assert_eq!(client.balance(&alice), 300);
    assert_eq!(client.balance(&bob), 200);
    assert_eq!(client.total_supply(), 500);
}

#[test]
fn transfer_from_spends_allowance() {
    let (env, client, _) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let spender = Address::generate(&env);

    client.mint(&alice, &500);
    client.approve(&alice, &spender, &300, &100);
    client.transfer_from(&spender, &alice, &bob, &250);

    assert_eq!(client.allowance(&alice, &spender), 50);
    assert_eq!(client.balance(&bob), 250);

    let result = client.try_transfer_from(&spender, &alice, &bob, &51);
    assert_eq!(result, Err(Ok(ShareTokenError::InsufficientAllowance)));
}

#[test]
fn approve_with_past_expiration_is_rejected() {
    let (env, client, _) = setup();
    let alice = Address::generate(&env);
    let spender = Address::generate(&env);

    env.ledger().set_sequence_number(50);
    let result = client.try_approve(&alice, &spender, &300, &10);
    assert_eq!(result, Err(Ok(ShareTokenError::InvalidExpiration)));
    assert_eq!(client.allowance(&alice, &spender), 0);
}

#[test]
fn burn_from_reduces_supply() {
    let (env, client, _) = setup();
    let alice = Address::generate(&env);
    let spender = Address::generate(&env);

    client.mint(&alice, &500);
    client.approve(&alice, &spender, &200, &100);
    client.burn_from(&spender, &alice, &200);

    assert_eq!(client.balance(&alice), 300);
    assert_eq!(client.total_supply(), 300);
    assert_eq!(client.allowance(&alice, &spender), 0);
}
