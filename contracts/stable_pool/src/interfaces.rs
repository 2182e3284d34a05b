use soroban_sdk::{contractclient, Address, Env, String};

/// Subset of the share token the pool drives. The pool is its admin.
#[contractclient(name = "ShareTokenClient")]
pub trait ShareTokenInterface {
    fn initialize(env: Env, admin: Address, decimals: u32, name: String, symbol: String);
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
}
