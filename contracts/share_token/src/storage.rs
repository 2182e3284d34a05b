use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ShareTokenError;

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers
const BALANCE_LIFETIME_THRESHOLD: u32 = 518400;
const BALANCE_BUMP_AMOUNT: u32 = 3110400; // ~180 days

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllowanceEntry {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum ShareTokenKey {
    Balance(Address),
    Allowance(Address, Address),
    TotalSupply,
    Admin,
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&ShareTokenKey::Admin)
}

pub fn get_admin(env: &Env) -> Result<Address, ShareTokenError> {
    env.storage()
        .instance()
        .get(&ShareTokenKey::Admin)
        .ok_or(ShareTokenError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ShareTokenKey::Admin, admin);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&ShareTokenKey::TotalSupply).unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&ShareTokenKey::TotalSupply, &supply);
}

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = ShareTokenKey::Balance(id.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    let key = ShareTokenKey::Balance(id.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

/// Expired allowances read as zero.
pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceEntry {
    let key = ShareTokenKey::Allowance(from.clone(), spender.clone());
    match env.storage().temporary().get::<_, AllowanceEntry>(&key) {
        Some(entry) if entry.expiration_ledger >= env.ledger().sequence() => entry,
        _ => AllowanceEntry {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, entry: &AllowanceEntry) {
    let key = ShareTokenKey::Allowance(from.clone(), spender.clone());
    env.storage().temporary().set(&key, entry);
    if entry.amount > 0 {
        let live_for = entry
            .expiration_ledger
            .saturating_sub(env.ledger().sequence());
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
