#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Env};
use stableswap_rate_oracle_interface::{RateOracle, StakeRate};

#[contracttype]
enum DataKey {
    Rate,
}

/// Staking-pool stand-in whose rate is set directly by tests.
#[contract]
pub struct MockRateOracle;

#[contractimpl]
impl MockRateOracle {
    pub fn set_rate(env: Env, total_native: i128, derivative_supply: i128) {
        env.storage().instance().set(
            &DataKey::Rate,
            &StakeRate {
                total_native,
                derivative_supply,
            },
        );
    }
}

#[contractimpl]
impl RateOracle for MockRateOracle {
    // Unset rate reads as an empty staking pool (1:1).
    fn get_rate(env: Env) -> StakeRate {
        env.storage().instance().get(&DataKey::Rate).unwrap_or(StakeRate {
            total_native: 0,
            derivative_supply: 0,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{MockRateOracle, MockRateOracleClient};
    use soroban_sdk::Env;

    #[test]
    fn rate_defaults_to_empty_pool() {
        let env = Env::default();
        let client = MockRateOracleClient::new(&env, &env.register_contract(None, MockRateOracle));

        let rate = client.get_rate();
        assert_eq!(rate.total_native, 0);
        assert_eq!(rate.derivative_supply, 0);
    }

    #[test]
    fn set_rate_is_reported_back() {
        let env = Env::default();
        let client = MockRateOracleClient::new(&env, &env.register_contract(None, MockRateOracle));

        client.set_rate(&11, &10);
        let rate = client.get_rate();
        assert_eq!(rate.total_native, 11);
        assert_eq!(rate.derivative_supply, 10);
    }
}
