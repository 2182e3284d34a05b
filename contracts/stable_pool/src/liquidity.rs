//! Share minting and redemption.
//!
//! Every function here is a pure calculation over `Reserves`; the contract
//! entry points in `lib.rs` move tokens and persist the result.

use crate::{
    errors::PoolError,
    math::{self, invariant, Reserves, N_ASSETS},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub shares: u128,
    /// Shares withheld by the mint fee.
    pub fee: u128,
    pub balances: [u128; N_ASSETS],
    pub total_shares: u128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Redemption {
    /// Internal-unit amount leaving the pool per asset.
    pub amounts: [u128; N_ASSETS],
    pub fee: u128,
    pub balances: [u128; N_ASSETS],
    pub total_shares: u128,
}

/// Shares minted for adding `amounts` (already scaled) to the pool.
///
/// The first deposit mints `D` shares and must seed every asset. Later
/// deposits mint `total * (D1 - D0) / D0`, less the mint fee.
pub fn compute_deposit(
    reserves: &Reserves,
    amounts: &[u128; N_ASSETS],
    mint_fee: u128,
) -> Result<Deposit, PoolError> {
    if amounts.iter().all(|&amount| amount == 0) {
        return Err(PoolError::ZeroAmount);
    }
    let first = reserves.total_shares == 0;
    if first && amounts.iter().any(|&amount| amount == 0) {
        return Err(PoolError::InvalidArgument);
    }

    let d_before = if first { 0 } else { reserves.invariant()? };

    let mut balances = reserves.balances;
    for (balance, &amount) in balances.iter_mut().zip(amounts.iter()) {
        *balance = math::add(*balance, amount)?;
    }
    let d_after = invariant::compute_d(&balances, reserves.amplification)?;

    let (shares, fee) = if first {
        if d_after == 0 {
            return Err(PoolError::InvalidArgument);
        }
        (d_after, 0)
    } else {
        let minted = math::mul_div(
            reserves.total_shares,
            math::sub(d_after, d_before)?,
            d_before,
        )?;
        let fee = math::fee_of(minted, mint_fee)?;
        (minted - fee, fee)
    };
    if shares == 0 {
        return Err(PoolError::InsufficientOutputAmount);
    }

    Ok(Deposit {
        shares,
        fee,
        balances,
        total_shares: math::add(reserves.total_shares, shares)?,
    })
}

fn check_burn(reserves: &Reserves, shares: u128) -> Result<(), PoolError> {
    if shares == 0 {
        return Err(PoolError::ZeroAmount);
    }
    if shares > reserves.total_shares {
        return Err(PoolError::InsufficientLiquidity);
    }
    Ok(())
}

/// Burns `shares` for the same fraction of every balance. Fee free.
pub fn compute_redeem_proportional(
    reserves: &Reserves,
    shares: u128,
) -> Result<Redemption, PoolError> {
    check_burn(reserves, shares)?;

    let mut amounts = [0u128; N_ASSETS];
    let mut balances = reserves.balances;
    for i in 0..N_ASSETS {
        amounts[i] = math::mul_div(reserves.balances[i], shares, reserves.total_shares)?;
        balances[i] = math::sub(balances[i], amounts[i])?;
    }

    Ok(Redemption {
        amounts,
        fee: 0,
        balances,
        total_shares: reserves.total_shares - shares,
    })
}

/// Burns `shares` for asset `index` alone.
///
/// The redeem fee is charged on the imbalance the withdrawal introduces:
/// each balance is reduced by `fee * n / (4(n-1))` times its distance from
/// a proportional withdrawal before the payout is re-solved.
pub fn compute_redeem_single(
    reserves: &Reserves,
    shares: u128,
    index: usize,
    redeem_fee: u128,
) -> Result<Redemption, PoolError> {
    if index >= N_ASSETS {
        return Err(PoolError::InvalidAssetIndex);
    }
    check_burn(reserves, shares)?;
    // The last shares would leave the other asset without owners.
    if shares == reserves.total_shares {
        return Err(PoolError::InsufficientLiquidity);
    }

    let amp = reserves.amplification;
    let xp = reserves.balances;
    let remaining = reserves.total_shares - shares;

    let d0 = reserves.invariant()?;
    let d1 = math::mul_div(d0, remaining, reserves.total_shares)?;
    let new_y = invariant::compute_y(&xp, amp, d1, index)?;

    let n = N_ASSETS as u128;
    let fee_rate = math::mul_div(redeem_fee, n, 4 * (n - 1))?;
    let mut reduced = xp;
    for j in 0..N_ASSETS {
        let proportional = math::mul_div(xp[j], d1, d0)?;
        let expected = if j == index {
            proportional.abs_diff(new_y)
        } else {
            math::sub(xp[j], proportional)?
        };
        reduced[j] = math::sub(reduced[j], math::fee_of(expected, fee_rate)?)?;
    }

    let y_after_fee = invariant::compute_y(&reduced, amp, d1, index)?;
    let amount = math::sub(reduced[index], y_after_fee)?.saturating_sub(1);
    let fee_free = math::sub(xp[index], new_y)?.saturating_sub(1);
    if amount == 0 {
        return Err(PoolError::InsufficientOutputAmount);
    }

    let mut amounts = [0u128; N_ASSETS];
    amounts[index] = amount;
    let mut balances = xp;
    balances[index] = math::sub(xp[index], amount)?;

    Ok(Redemption {
        amounts,
        fee: fee_free.saturating_sub(amount),
        balances,
        total_shares: remaining,
    })
}
