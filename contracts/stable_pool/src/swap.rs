use crate::{
    errors::PoolError,
    math::{self, invariant, Reserves, N_ASSETS},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Swap {
    pub amount_in: u128,
    pub amount_out: u128,
    /// Retained by the pool, in units of the output asset.
    pub fee: u128,
    pub balances: [u128; N_ASSETS],
}

/// Exchanges `amount_in` (scaled) of asset `from` for asset `to`.
///
/// D is taken from the pre-swap balances and held constant while the output
/// balance is re-solved; the fee is then cut from the output and stays in
/// the pool.
pub fn compute_swap(
    reserves: &Reserves,
    from: usize,
    to: usize,
    amount_in: u128,
    swap_fee: u128,
) -> Result<Swap, PoolError> {
    if from == to {
        return Err(PoolError::IdenticalAssets);
    }
    if from >= N_ASSETS || to >= N_ASSETS {
        return Err(PoolError::InvalidAssetIndex);
    }
    if amount_in == 0 {
        return Err(PoolError::ZeroAmount);
    }
    if reserves.total_shares == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }

    let d = reserves.invariant()?;
    let mut balances = reserves.balances;
    balances[from] = math::add(balances[from], amount_in)?;
    let y = invariant::compute_y(&balances, reserves.amplification, d, to)?;

    // One unit stays behind to absorb solver rounding.
    let raw_out = math::sub(reserves.balances[to], y)?.saturating_sub(1);
    let fee = math::fee_of(raw_out, swap_fee)?;
    let amount_out = raw_out - fee;
    if amount_out == 0 {
        return Err(PoolError::InsufficientOutputAmount);
    }
    balances[to] = math::sub(reserves.balances[to], amount_out)?;

    Ok(Swap {
        amount_in,
        amount_out,
        fee,
        balances,
    })
}
