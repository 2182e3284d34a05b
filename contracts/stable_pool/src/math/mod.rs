//! Checked integer arithmetic for balances, shares and fees.
//! All quantities are non-negative integers in the pool's internal unit; every
//! operation that could overflow or divide by zero returns `Arithmetic`.

pub mod invariant;

use primitive_types::U256;

use crate::errors::PoolError;

/// Number of assets held by a pool.
pub const N_ASSETS: usize = 2;
/// Amplification coefficients are stored in hundredths.
pub const A_PRECISION: u128 = 100;
/// Denominator shared by the mint, swap and redeem fee numerators.
pub const FEE_PRECISION: u128 = 10_000_000_000;
/// Highest accepted fee numerator (5%).
pub const MAX_FEE: u128 = FEE_PRECISION / 20;
/// Iteration cap for the Newton solvers.
pub const MAX_ITERATIONS: u32 = 255;
/// Scale of the virtual price (D per share).
pub const PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;
/// Largest supported token decimals after normalization.
pub const MAX_DECIMALS: u32 = 18;

pub fn add(a: u128, b: u128) -> Result<u128, PoolError> {
    a.checked_add(b).ok_or(PoolError::Arithmetic)
}

pub fn sub(a: u128, b: u128) -> Result<u128, PoolError> {
    a.checked_sub(b).ok_or(PoolError::Arithmetic)
}

pub fn mul(a: u128, b: u128) -> Result<u128, PoolError> {
    a.checked_mul(b).ok_or(PoolError::Arithmetic)
}

pub fn div(a: u128, b: u128) -> Result<u128, PoolError> {
    a.checked_div(b).ok_or(PoolError::Arithmetic)
}

/// `a * b / denominator`, truncating, with a 256-bit intermediate product.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, PoolError> {
    if denominator == 0 {
        return Err(PoolError::Arithmetic);
    }
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(PoolError::Arithmetic)?;
    narrow(product / U256::from(denominator))
}

/// Portion of `amount` owed at `fee` (a numerator over `FEE_PRECISION`).
pub fn fee_of(amount: u128, fee: u128) -> Result<u128, PoolError> {
    if fee == 0 {
        return Ok(0);
    }
    mul_div(amount, fee, FEE_PRECISION)
}

/// Narrows a solver intermediate back to `u128`.
pub fn narrow(value: U256) -> Result<u128, PoolError> {
    if value > U256::from(u128::MAX) {
        return Err(PoolError::Arithmetic);
    }
    Ok(value.low_u128())
}

/// Caller-supplied amounts are `i128`; negatives are rejected.
pub fn to_u128(value: i128) -> Result<u128, PoolError> {
    u128::try_from(value).map_err(|_| PoolError::InvalidArgument)
}

pub fn to_i128(value: u128) -> Result<i128, PoolError> {
    i128::try_from(value).map_err(|_| PoolError::Arithmetic)
}

pub fn pow10(exp: u32) -> Result<u128, PoolError> {
    10u128.checked_pow(exp).ok_or(PoolError::Arithmetic)
}

/// Pool figures every invariant-touching operation starts from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reserves {
    /// Scaled balances.
    pub balances: [u128; N_ASSETS],
    pub total_shares: u128,
    /// Effective amplification, in `A_PRECISION` units.
    pub amplification: u128,
}

impl Reserves {
    pub fn invariant(&self) -> Result<u128, PoolError> {
        invariant::compute_d(&self.balances, self.amplification)
    }

    /// `D` per share scaled by `PRICE_PRECISION`; zero for an empty pool.
    pub fn virtual_price(&self) -> Result<u128, PoolError> {
        if self.total_shares == 0 {
            return Ok(0);
        }
        mul_div(self.invariant()?, PRICE_PRECISION, self.total_shares)
    }
}
