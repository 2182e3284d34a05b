#![cfg(test)]

// ---------------------------------------------------------------------------
// Stable pool test suite
//
// invariant, amplification, liquidity, swap and valuation exercise the pure
// calculations without a deployed pool. integration and events deploy the
// pool next to two Stellar asset contracts, the share token and a settable
// rate oracle.
// ---------------------------------------------------------------------------

mod liquidity;

use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, String,
};
use stableswap_mock_rate_oracle::{MockRateOracle, MockRateOracleClient};
use stableswap_share_token::{ShareToken, ShareTokenClient};

use crate::{PoolConfig, StablePool, StablePoolClient};

pub(crate) const AMPLIFICATION: u64 = 1_000;
pub(crate) const SEED: i128 = 100_000_000;

pub(crate) fn config() -> PoolConfig {
    PoolConfig {
        mint_fee: 0,
        swap_fee: 0,
        redeem_fee: 0,
        min_ramp_ledgers: 100,
        max_a_change: 10,
    }
}

pub(crate) struct Fixture<'a> {
    pub env: Env,
    pub authority: Address,
    pub pool: StablePoolClient<'a>,
    pub shares: ShareTokenClient<'a>,
    pub oracle: MockRateOracleClient<'a>,
    pub native: TokenClient<'a>,
    pub derivative: TokenClient<'a>,
}

impl<'a> Fixture<'a> {
    /// Deploys every contract without initializing the pool.
    pub fn deploy() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let authority = Address::generate(&env);
        let issuer = Address::generate(&env);
        let native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let derivative = env.register_stellar_asset_contract_v2(issuer).address();

        Fixture {
            pool: StablePoolClient::new(&env, &env.register_contract(None, StablePool)),
            shares: ShareTokenClient::new(&env, &env.register_contract(None, ShareToken)),
            oracle: MockRateOracleClient::new(&env, &env.register_contract(None, MockRateOracle)),
            native: TokenClient::new(&env, &native),
            derivative: TokenClient::new(&env, &derivative),
            authority,
            env,
        }
    }

    /// Deploys and runs both initialization phases.
    pub fn with_config(config: PoolConfig) -> Self {
        let fixture = Self::deploy();
        fixture.pool.initialize_pool(
            &fixture.authority,
            &fixture.native.address,
            &fixture.derivative.address,
            &fixture.oracle.address,
            &AMPLIFICATION,
            &config,
        );
        fixture.pool.initialize_shares(
            &fixture.authority,
            &fixture.shares.address,
            &String::from_str(&fixture.env, "Stable Pool Share"),
            &String::from_str(&fixture.env, "SPS"),
        );
        fixture
    }

    pub fn new() -> Self {
        Self::with_config(config())
    }

    /// An initialized pool holding `SEED` of each asset.
    pub fn seeded(config: PoolConfig) -> (Self, Address) {
        let fixture = Self::with_config(config);
        let provider = fixture.funded_user(SEED);
        fixture.pool.deposit(
            &provider,
            &vec![&fixture.env, SEED, SEED],
            &0,
        );
        (fixture, provider)
    }

    /// A fresh address holding `amount` of both assets.
    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.native.address).mint(&user, &amount);
        StellarAssetClient::new(&self.env, &self.derivative.address).mint(&user, &amount);
        user
    }
}
