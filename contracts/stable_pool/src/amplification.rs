//! Time-gated amplification ramp.
//!
//! `A` moves linearly from `amplification_current` at `block_start` to
//! `amplification_future` at `block_target`. The effective value is a pure
//! function of the ledger sequence, recomputed on every read.

use crate::{errors::PoolError, math::A_PRECISION, storage::PoolState};

pub const MIN_AMPLIFICATION: u64 = A_PRECISION as u64;
pub const MAX_AMPLIFICATION: u64 = 1_000_000 * A_PRECISION as u64;

pub fn interpolate(
    a_start: u64,
    block_start: u64,
    a_target: u64,
    block_target: u64,
    height: u64,
) -> Result<u64, PoolError> {
    if height <= block_start {
        return Ok(a_start);
    }
    if height >= block_target {
        return Ok(a_target);
    }

    let elapsed = (height - block_start) as u128;
    let duration = (block_target - block_start) as u128;
    let step = |diff: u64| -> Result<u64, PoolError> {
        let moved = (diff as u128)
            .checked_mul(elapsed)
            .ok_or(PoolError::Arithmetic)?
            / duration;
        u64::try_from(moved).map_err(|_| PoolError::Arithmetic)
    };

    if a_target > a_start {
        a_start
            .checked_add(step(a_target - a_start)?)
            .ok_or(PoolError::Arithmetic)
    } else {
        a_start
            .checked_sub(step(a_start - a_target)?)
            .ok_or(PoolError::Arithmetic)
    }
}

pub fn in_bounds(amplification: u64) -> bool {
    (MIN_AMPLIFICATION..=MAX_AMPLIFICATION).contains(&amplification)
}

impl PoolState {
    /// Effective amplification at ledger `height`.
    pub fn amplification_at(&self, height: u64) -> Result<u64, PoolError> {
        interpolate(
            self.amplification_current,
            self.amplification_block_start,
            self.amplification_future,
            self.amplification_block_target,
            height,
        )
    }

    /// Schedules a ramp towards `future` ending at ledger `target`.
    ///
    /// The in-flight ramp is frozen at its value for `height`, which becomes
    /// the new starting point. Nothing is written unless every check passes.
    pub fn ramp_amplification(
        &mut self,
        future: u64,
        target: u64,
        height: u64,
    ) -> Result<(), PoolError> {
        let earliest = height
            .checked_add(self.config.min_ramp_ledgers)
            .ok_or(PoolError::Arithmetic)?;
        if target < earliest {
            return Err(PoolError::RampTooShort);
        }

        let current = self.amplification_at(height)?;
        let max_change = self.config.max_a_change as u128;
        let within_ceiling = (future as u128) <= (current as u128) * max_change;
        let within_floor = (future as u128) * max_change >= current as u128;
        if !in_bounds(future) || !within_ceiling || !within_floor {
            return Err(PoolError::AmplificationOutOfBounds);
        }

        self.amplification_current = current;
        self.amplification_block_start = height;
        self.amplification_future = future;
        self.amplification_block_target = target;
        Ok(())
    }
}
