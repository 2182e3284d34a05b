//! StableSwap invariant solvers.
//!
//! For `n` assets with scaled balances `xp` and amplification `A` (stored in
//! `A_PRECISION` units, `Ann = A * n^n`) the invariant `D` satisfies
//!
//! ```text
//! Ann * sum(x) + D = Ann * D + D^(n+1) / (n^n * prod(x))
//! ```
//!
//! Both solvers run Newton's method until two successive estimates differ by
//! at most one unit. After the first step the exact iteration only descends,
//! so an estimate that rises again is truncation noise around the root: the
//! solver settles there instead of cycling. `NotConverged` is left for
//! iterations that exhaust `MAX_ITERATIONS`.
//! Intermediates are 256-bit so `D^(n+1)` terms cannot overflow for any
//! balance that fits in `u128`.

use primitive_types::U256;

use super::{narrow, A_PRECISION, MAX_ITERATIONS, N_ASSETS};
use crate::errors::PoolError;

fn add(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_add(b).ok_or(PoolError::Arithmetic)
}

fn sub(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_sub(b).ok_or(PoolError::Arithmetic)
}

fn mul(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_mul(b).ok_or(PoolError::Arithmetic)
}

fn div(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_div(b).ok_or(PoolError::Arithmetic)
}

fn assets() -> U256 {
    U256::from(N_ASSETS as u64)
}

/// `A * n^n`, still in `A_PRECISION` units.
fn ann(amp: u128) -> Result<U256, PoolError> {
    let mut ann = U256::from(amp);
    for _ in 0..N_ASSETS {
        ann = mul(ann, assets())?;
    }
    Ok(ann)
}

fn converged(current: U256, previous: U256) -> bool {
    let delta = if current > previous {
        current - previous
    } else {
        previous - current
    };
    delta <= U256::one()
}

/// Solves the invariant `D` for the scaled balances `xp`.
///
/// An empty basket has `D = 0`. A basket with one empty side has no finite
/// solution and is reported as `NotConverged`.
pub fn compute_d(xp: &[u128; N_ASSETS], amp: u128) -> Result<u128, PoolError> {
    let mut sum = U256::zero();
    for &x in xp.iter() {
        sum = add(sum, U256::from(x))?;
    }
    if sum.is_zero() {
        return Ok(0);
    }
    if xp.iter().any(|&x| x == 0) {
        return Err(PoolError::NotConverged);
    }

    let n = assets();
    let a_precision = U256::from(A_PRECISION);
    let ann = ann(amp)?;
    let ann_sum = div(mul(ann, sum)?, a_precision)?;
    let ann_less_one = sub(ann, a_precision)?;

    let mut d = sum;
    for round in 0..MAX_ITERATIONS {
        // d_p = D^(n+1) / (n^n * prod(x))
        let mut d_p = d;
        for &x in xp.iter() {
            d_p = div(mul(d_p, d)?, mul(U256::from(x), n)?)?;
        }
        let previous = d;

        let numerator = mul(add(ann_sum, mul(d_p, n)?)?, d)?;
        let denominator = add(
            div(mul(ann_less_one, d)?, a_precision)?,
            mul(add(n, U256::one())?, d_p)?,
        )?;
        d = div(numerator, denominator)?;

        if converged(d, previous) {
            return narrow(d);
        }
        // Rounding cycle near the root; the smaller D favours the pool.
        if round > 0 && d > previous {
            return narrow(previous);
        }
    }
    Err(PoolError::NotConverged)
}

/// Solves for the balance of asset `index` that keeps the invariant at `d`
/// while every other balance in `xp` stays fixed. `xp[index]` is ignored.
pub fn compute_y(
    xp: &[u128; N_ASSETS],
    amp: u128,
    d: u128,
    index: usize,
) -> Result<u128, PoolError> {
    if index >= N_ASSETS {
        return Err(PoolError::InvalidAssetIndex);
    }

    let n = assets();
    let a_precision = U256::from(A_PRECISION);
    let ann = ann(amp)?;
    let d = U256::from(d);

    let mut c = d;
    let mut sum = U256::zero();
    for (j, &x) in xp.iter().enumerate() {
        if j == index {
            continue;
        }
        if x == 0 {
            return Err(PoolError::NotConverged);
        }
        sum = add(sum, U256::from(x))?;
        c = div(mul(c, d)?, mul(U256::from(x), n)?)?;
    }
    c = div(mul(mul(c, d)?, a_precision)?, mul(ann, n)?)?;
    let b = add(sum, div(mul(d, a_precision)?, ann)?)?;

    let mut y = d;
    for round in 0..MAX_ITERATIONS {
        let previous = y;
        // y = (y^2 + c) / (2y + b - D)
        let numerator = add(mul(y, y)?, c)?;
        let denominator = sub(add(mul(y, U256::from(2u8))?, b)?, d)?;
        y = div(numerator, denominator)?;

        if converged(y, previous) {
            return narrow(y);
        }
        // Rounding cycle; the larger balance pays out less.
        if round > 0 && y > previous {
            return narrow(y);
        }
    }
    Err(PoolError::NotConverged)
}
