use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::{
    errors::PoolError,
    math::{self, N_ASSETS},
};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers

/// Parameters fixed at `initialize_pool`.
///
/// Fees are numerators over `FEE_PRECISION`. `min_ramp_ledgers` and
/// `max_a_change` bound every later amplification change.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub mint_fee: u64,
    pub swap_fee: u64,
    pub redeem_fee: u64,
    pub min_ramp_ledgers: u64,
    pub max_a_change: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub authority: Address,
    /// `[native, derivative]`.
    pub tokens: Vec<Address>,
    pub rate_oracle: Address,
    pub share_token: Option<Address>,
    pub precision_factors: Vec<i128>,
    /// Internal-unit balances: raw vault balance valued in native units and
    /// scaled by the precision factor.
    pub balances: Vec<i128>,
    pub total_shares: i128,
    pub amplification_current: u64,
    pub amplification_block_start: u64,
    pub amplification_future: u64,
    pub amplification_block_target: u64,
    pub config: PoolConfig,
    pub pool_initialized: bool,
    pub shares_initialized: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Pool,
}

/// Reads a two-element vector as a fixed array of non-negative amounts.
pub fn to_array(values: &Vec<i128>) -> Result<[u128; N_ASSETS], PoolError> {
    if values.len() as usize != N_ASSETS {
        return Err(PoolError::InvalidArgument);
    }
    let mut out = [0u128; N_ASSETS];
    for (i, value) in values.iter().enumerate() {
        out[i] = math::to_u128(value)?;
    }
    Ok(out)
}

pub fn to_vec(env: &Env, values: &[u128; N_ASSETS]) -> Result<Vec<i128>, PoolError> {
    let mut out = Vec::new(env);
    for &value in values.iter() {
        out.push_back(math::to_i128(value)?);
    }
    Ok(out)
}

impl PoolState {
    pub fn balances(&self) -> Result<[u128; N_ASSETS], PoolError> {
        to_array(&self.balances)
    }

    pub fn precisions(&self) -> Result<[u128; N_ASSETS], PoolError> {
        to_array(&self.precision_factors)
    }

    pub fn token(&self, index: usize) -> Result<Address, PoolError> {
        self.tokens
            .get(index as u32)
            .ok_or(PoolError::InvalidAssetIndex)
    }

    pub fn shares(&self) -> Result<u128, PoolError> {
        math::to_u128(self.total_shares)
    }

    /// Share ledger address; present only once both init phases are done.
    pub fn share_token(&self) -> Result<Address, PoolError> {
        if !(self.pool_initialized && self.shares_initialized) {
            return Err(PoolError::NotInitialized);
        }
        self.share_token.clone().ok_or(PoolError::NotInitialized)
    }

    /// Writes post-operation balances and supply in one step.
    pub fn commit(
        &mut self,
        env: &Env,
        balances: &[u128; N_ASSETS],
        total_shares: u128,
    ) -> Result<(), PoolError> {
        let balances = to_vec(env, balances)?;
        let total_shares = math::to_i128(total_shares)?;
        self.balances = balances;
        self.total_shares = total_shares;
        Ok(())
    }
}

pub fn get_pool_state(env: &Env) -> Option<PoolState> {
    env.storage().instance().get(&DataKey::Pool)
}

pub fn set_pool_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::Pool, state);
}

pub fn has_pool_state(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Pool)
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
