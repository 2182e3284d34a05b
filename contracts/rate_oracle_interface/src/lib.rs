#![no_std]

use soroban_sdk::{contractclient, contracttype, Env};

/// Conversion rate reported by a staking pool: `total_native` units of the
/// native asset back `derivative_supply` units of the derivative token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRate {
    pub total_native: i128,
    pub derivative_supply: i128,
}

/// Staking-pool exchange-rate oracle.
/// The stable pool only reads from it, once per operation, to value its
/// derivative-asset balance in native units.
#[contractclient(name = "RateOracleClient")]
pub trait RateOracle {
    fn get_rate(env: Env) -> StakeRate;
}
