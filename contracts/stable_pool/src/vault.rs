//! Custody boundary: valuation of raw token amounts, transfers in and out of
//! the pool's own token balances, and yield collection.

use soroban_sdk::{log, token::TokenClient, Address, Env};
use stableswap_rate_oracle_interface::RateOracleClient;

use crate::{
    errors::PoolError,
    math::{self, invariant, N_ASSETS},
    storage::PoolState,
};

/// Native value of one token unit, `numerator / denominator`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rate {
    pub numerator: u128,
    pub denominator: u128,
}

impl Rate {
    pub const PAR: Rate = Rate {
        numerator: 1,
        denominator: 1,
    };
}

/// Converts between raw token units and the pool's internal unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Valuation {
    pub precisions: [u128; N_ASSETS],
    pub rates: [Rate; N_ASSETS],
}

impl Valuation {
    /// Reads the precision factors and asks the oracle for the derivative
    /// rate. An oracle reporting no supply values the derivative at par.
    pub fn load(env: &Env, state: &PoolState) -> Result<Self, PoolError> {
        let quote = RateOracleClient::new(env, &state.rate_oracle).get_rate();
        let derivative = if quote.derivative_supply == 0 {
            Rate::PAR
        } else {
            Rate {
                numerator: math::to_u128(quote.total_native)?,
                denominator: math::to_u128(quote.derivative_supply)?,
            }
        };
        if derivative.numerator == 0 {
            return Err(PoolError::InvalidArgument);
        }
        Ok(Valuation {
            precisions: state.precisions()?,
            rates: [Rate::PAR, derivative],
        })
    }

    fn factors(&self, index: usize) -> Result<(u128, Rate), PoolError> {
        match (self.precisions.get(index), self.rates.get(index)) {
            (Some(&precision), Some(&rate)) => Ok((precision, rate)),
            _ => Err(PoolError::InvalidAssetIndex),
        }
    }

    pub fn to_internal(&self, index: usize, raw: u128) -> Result<u128, PoolError> {
        let (precision, rate) = self.factors(index)?;
        math::mul_div(
            math::mul(raw, precision)?,
            rate.numerator,
            rate.denominator,
        )
    }

    pub fn to_internal_all(&self, raw: &[u128; N_ASSETS]) -> Result<[u128; N_ASSETS], PoolError> {
        let mut out = [0u128; N_ASSETS];
        for (i, &amount) in raw.iter().enumerate() {
            out[i] = self.to_internal(i, amount)?;
        }
        Ok(out)
    }

    /// Floors, so an outgoing amount never exceeds what was booked.
    pub fn to_raw(&self, index: usize, internal: u128) -> Result<u128, PoolError> {
        let (precision, rate) = self.factors(index)?;
        math::mul_div(
            internal,
            rate.denominator,
            math::mul(rate.numerator, precision)?,
        )
    }
}

/// Moves `amount` of asset `index` from `from` into the pool.
pub fn pull(
    env: &Env,
    state: &PoolState,
    index: usize,
    from: &Address,
    amount: u128,
) -> Result<(), PoolError> {
    if amount == 0 {
        return Ok(());
    }
    TokenClient::new(env, &state.token(index)?).transfer(
        from,
        &env.current_contract_address(),
        &math::to_i128(amount)?,
    );
    Ok(())
}

/// Pays `amount` of asset `index` out of the pool to `to`.
pub fn push(
    env: &Env,
    state: &PoolState,
    index: usize,
    to: &Address,
    amount: u128,
) -> Result<(), PoolError> {
    if amount == 0 {
        return Ok(());
    }
    TokenClient::new(env, &state.token(index)?).transfer(
        &env.current_contract_address(),
        to,
        &math::to_i128(amount)?,
    );
    Ok(())
}

/// Raw token amounts currently held by the pool.
pub fn held(env: &Env, state: &PoolState) -> Result<[u128; N_ASSETS], PoolError> {
    let pool = env.current_contract_address();
    let mut out = [0u128; N_ASSETS];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = math::to_u128(TokenClient::new(env, &state.token(i)?).balance(&pool))?;
    }
    Ok(out)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct YieldSync {
    pub d_before: u128,
    pub d_after: u128,
    pub balances: [u128; N_ASSETS],
}

/// Rebooks the balances from what the pool actually holds.
///
/// Accrued staking yield and donations raise D and are kept; a drop in D
/// (a falling exchange rate or missing funds) is refused.
pub fn collect_yield(
    env: &Env,
    state: &mut PoolState,
    valuation: &Valuation,
    amplification: u128,
) -> Result<YieldSync, PoolError> {
    let booked = state.balances()?;
    let balances = valuation.to_internal_all(&held(env, state)?)?;

    let d_before = invariant::compute_d(&booked, amplification)?;
    let d_after = invariant::compute_d(&balances, amplification)?;
    if d_after < d_before {
        log!(env, "sync rejected: invariant fell", d_before, d_after);
        return Err(PoolError::PoolImbalanced);
    }

    let total_shares = state.shares()?;
    state.commit(env, &balances, total_shares)?;
    Ok(YieldSync {
        d_before,
        d_after,
        balances,
    })
}
