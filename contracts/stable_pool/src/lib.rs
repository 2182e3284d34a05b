#![no_std]

mod amplification;
mod errors;
mod events;
mod interfaces;
mod liquidity;
mod math;
mod receipts;
mod storage;
mod swap;
mod vault;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; the pool is no_std so we must opt-in explicitly.

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env, String, Vec};

pub use errors::PoolError;
pub use receipts::{DepositReceipt, RedeemReceipt, SwapReceipt};
pub use storage::{PoolConfig, PoolState};

use amplification::in_bounds;
use events::PoolEvents;
use interfaces::ShareTokenClient;
use math::{Reserves, MAX_DECIMALS, MAX_FEE, N_ASSETS};
use storage::{
    extend_instance_ttl, get_pool_state, has_pool_state, set_pool_state, to_array, to_vec,
};
use vault::Valuation;

#[contract]
pub struct StablePool;

fn height(env: &Env) -> u64 {
    env.ledger().sequence() as u64
}

fn load(env: &Env) -> Result<PoolState, PoolError> {
    get_pool_state(env).ok_or(PoolError::NotInitialized)
}

fn authorize(state: &PoolState, caller: &Address) -> Result<(), PoolError> {
    if *caller != state.authority {
        return Err(PoolError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

/// Common decimals of the basket and the factor lifting each asset to it.
fn normalization(env: &Env, tokens: &Vec<Address>) -> Result<(u32, [u128; N_ASSETS]), PoolError> {
    let mut decimals = [0u32; N_ASSETS];
    for (i, slot) in decimals.iter_mut().enumerate() {
        let token = tokens.get(i as u32).ok_or(PoolError::InvalidArgument)?;
        *slot = TokenClient::new(env, &token).decimals();
    }
    let target = decimals.iter().copied().max().unwrap_or(0);
    if target > MAX_DECIMALS {
        return Err(PoolError::InvalidArgument);
    }
    let mut precisions = [0u128; N_ASSETS];
    for (i, &d) in decimals.iter().enumerate() {
        precisions[i] = math::pow10(target - d)?;
    }
    Ok((target, precisions))
}

/// Loads a fully initialized pool and books any yield that arrived since
/// the last call, returning the figures the operation runs on.
fn prepare(env: &Env) -> Result<(PoolState, Valuation, Reserves), PoolError> {
    let mut state = load(env)?;
    state.share_token()?;

    let valuation = Valuation::load(env, &state)?;
    let amplification = state.amplification_at(height(env))? as u128;
    if state.total_shares > 0 {
        let synced = vault::collect_yield(env, &mut state, &valuation, amplification)?;
        if synced.d_after != synced.d_before {
            PoolEvents::sync(
                env,
                math::to_i128(synced.d_before)?,
                math::to_i128(synced.d_after)?,
                &state.balances,
            );
        }
    }

    let reserves = booked(&state, amplification)?;
    Ok((state, valuation, reserves))
}

fn booked(state: &PoolState, amplification: u128) -> Result<Reserves, PoolError> {
    Ok(Reserves {
        balances: state.balances()?,
        total_shares: state.shares()?,
        amplification,
    })
}

/// Swap quote in raw token units: `(quote, amount_out, fee)`.
fn price_swap(
    valuation: &Valuation,
    reserves: &Reserves,
    swap_fee: u64,
    from: u32,
    to: u32,
    amount_in: u128,
) -> Result<(swap::Swap, u128, u128), PoolError> {
    let (from, to) = (from as usize, to as usize);
    let scaled_in = valuation.to_internal(from, amount_in)?;
    let quote = swap::compute_swap(reserves, from, to, scaled_in, swap_fee as u128)?;
    let amount_out = valuation.to_raw(to, quote.amount_out)?;
    if amount_out == 0 {
        return Err(PoolError::InsufficientOutputAmount);
    }
    Ok((quote, amount_out, valuation.to_raw(to, quote.fee)?))
}

fn commit(env: &Env, state: &PoolState) {
    set_pool_state(env, state);
    extend_instance_ttl(env);
}

#[contractimpl]
impl StablePool {
    /// First initialization phase: assets, oracle, amplification and fees.
    ///
    /// Precision factors are derived from the assets' decimals so that both
    /// balances are booked in the same unit.
    pub fn initialize_pool(
        env: Env,
        authority: Address,
        native_token: Address,
        derivative_token: Address,
        rate_oracle: Address,
        amplification: u64,
        config: PoolConfig,
    ) -> Result<(), PoolError> {
        if has_pool_state(&env) {
            return Err(PoolError::AlreadyInitialized);
        }
        authority.require_auth();

        if native_token == derivative_token {
            return Err(PoolError::IdenticalAssets);
        }
        if !in_bounds(amplification) {
            return Err(PoolError::AmplificationOutOfBounds);
        }
        let fees = [config.mint_fee, config.swap_fee, config.redeem_fee];
        if fees.iter().any(|&fee| u128::from(fee) > MAX_FEE)
            || config.min_ramp_ledgers == 0
            || config.max_a_change == 0
        {
            return Err(PoolError::InvalidArgument);
        }

        let tokens = Vec::from_array(&env, [native_token.clone(), derivative_token.clone()]);
        let (_, precisions) = normalization(&env, &tokens)?;
        let now = height(&env);

        let state = PoolState {
            authority: authority.clone(),
            tokens,
            rate_oracle,
            share_token: None,
            precision_factors: to_vec(&env, &precisions)?,
            balances: to_vec(&env, &[0; N_ASSETS])?,
            total_shares: 0,
            amplification_current: amplification,
            amplification_block_start: now,
            amplification_future: amplification,
            amplification_block_target: now,
            config,
            pool_initialized: true,
            shares_initialized: false,
        };
        commit(&env, &state);

        PoolEvents::create(&env, &authority, &native_token, &derivative_token, amplification);
        Ok(())
    }

    /// Second initialization phase: hands the share token to the pool.
    pub fn initialize_shares(
        env: Env,
        caller: Address,
        share_token: Address,
        name: String,
        symbol: String,
    ) -> Result<(), PoolError> {
        let mut state = load(&env)?;
        if state.shares_initialized {
            return Err(PoolError::AlreadyInitialized);
        }
        authorize(&state, &caller)?;

        let (decimals, _) = normalization(&env, &state.tokens)?;
        ShareTokenClient::new(&env, &share_token).initialize(
            &env.current_contract_address(),
            &decimals,
            &name,
            &symbol,
        );

        state.share_token = Some(share_token.clone());
        state.shares_initialized = true;
        commit(&env, &state);

        PoolEvents::shares(&env, &caller, &share_token, decimals);
        Ok(())
    }

    /// Deposits raw `amounts` of both assets and mints shares to `user`.
    pub fn deposit(
        env: Env,
        user: Address,
        amounts: Vec<i128>,
        min_shares: i128,
    ) -> Result<DepositReceipt, PoolError> {
        user.require_auth();
        let raw = to_array(&amounts)?;
        let min_shares = math::to_u128(min_shares)?;

        let (mut state, valuation, reserves) = prepare(&env)?;
        let scaled = valuation.to_internal_all(&raw)?;
        let quote = liquidity::compute_deposit(&reserves, &scaled, state.config.mint_fee as u128)?;
        if quote.shares < min_shares {
            return Err(PoolError::SlippageExceeded);
        }

        let shares = math::to_i128(quote.shares)?;
        let share_token = state.share_token()?;
        for (i, &amount) in raw.iter().enumerate() {
            vault::pull(&env, &state, i, &user, amount)?;
        }
        ShareTokenClient::new(&env, &share_token).mint(&user, &shares);

        state.commit(&env, &quote.balances, quote.total_shares)?;
        commit(&env, &state);

        let receipt = DepositReceipt {
            amounts,
            shares,
            fee: math::to_i128(quote.fee)?,
            balances: state.balances.clone(),
            total_shares: state.total_shares,
        };
        PoolEvents::mint(
            &env,
            &user,
            &receipt.amounts,
            receipt.shares,
            receipt.fee,
            receipt.total_shares,
        );
        Ok(receipt)
    }

    /// Sells `amount_in` of asset `from` for asset `to`.
    pub fn swap(
        env: Env,
        user: Address,
        from: u32,
        to: u32,
        amount_in: i128,
        min_out: i128,
    ) -> Result<SwapReceipt, PoolError> {
        user.require_auth();
        let raw_in = math::to_u128(amount_in)?;
        let min_out = math::to_u128(min_out)?;

        let (mut state, valuation, reserves) = prepare(&env)?;
        let (quote, amount_out, fee) =
            price_swap(&valuation, &reserves, state.config.swap_fee, from, to, raw_in)?;
        if amount_out < min_out {
            return Err(PoolError::SlippageExceeded);
        }

        vault::pull(&env, &state, from as usize, &user, raw_in)?;
        vault::push(&env, &state, to as usize, &user, amount_out)?;

        state.commit(&env, &quote.balances, reserves.total_shares)?;
        commit(&env, &state);

        let receipt = SwapReceipt {
            from,
            to,
            amount_in,
            amount_out: math::to_i128(amount_out)?,
            fee: math::to_i128(fee)?,
            balances: state.balances.clone(),
        };
        PoolEvents::swap(
            &env,
            &user,
            from,
            to,
            receipt.amount_in,
            receipt.amount_out,
            receipt.fee,
        );
        Ok(receipt)
    }

    /// Burns `shares` for a proportional slice of both balances.
    pub fn redeem_proportional(
        env: Env,
        user: Address,
        shares: i128,
        min_amounts: Vec<i128>,
    ) -> Result<RedeemReceipt, PoolError> {
        user.require_auth();
        let burned = math::to_u128(shares)?;
        let minimums = to_array(&min_amounts)?;

        let (mut state, valuation, reserves) = prepare(&env)?;
        let quote = liquidity::compute_redeem_proportional(&reserves, burned)?;
        let mut paid = [0u128; N_ASSETS];
        for i in 0..N_ASSETS {
            paid[i] = valuation.to_raw(i, quote.amounts[i])?;
            if paid[i] < minimums[i] {
                return Err(PoolError::SlippageExceeded);
            }
        }

        let share_token = state.share_token()?;
        ShareTokenClient::new(&env, &share_token).burn(&user, &shares);
        for (i, &amount) in paid.iter().enumerate() {
            vault::push(&env, &state, i, &user, amount)?;
        }

        state.commit(&env, &quote.balances, quote.total_shares)?;
        commit(&env, &state);

        let receipt = RedeemReceipt {
            shares,
            amounts: to_vec(&env, &paid)?,
            fee: 0,
            balances: state.balances.clone(),
            total_shares: state.total_shares,
        };
        PoolEvents::redeem(&env, &user, shares, &receipt.amounts, receipt.total_shares);
        Ok(receipt)
    }

    /// Burns `shares` for asset `index` alone, paying the imbalance fee.
    pub fn redeem_single(
        env: Env,
        user: Address,
        shares: i128,
        index: u32,
        min_out: i128,
    ) -> Result<RedeemReceipt, PoolError> {
        user.require_auth();
        let burned = math::to_u128(shares)?;
        let min_out = math::to_u128(min_out)?;
        let asset = index as usize;

        let (mut state, valuation, reserves) = prepare(&env)?;
        let quote = liquidity::compute_redeem_single(
            &reserves,
            burned,
            asset,
            state.config.redeem_fee as u128,
        )?;
        let amount = valuation.to_raw(asset, quote.amounts[asset])?;
        if amount == 0 {
            return Err(PoolError::InsufficientOutputAmount);
        }
        if amount < min_out {
            return Err(PoolError::SlippageExceeded);
        }

        let share_token = state.share_token()?;
        ShareTokenClient::new(&env, &share_token).burn(&user, &shares);
        vault::push(&env, &state, asset, &user, amount)?;

        state.commit(&env, &quote.balances, quote.total_shares)?;
        commit(&env, &state);

        let mut paid = [0u128; N_ASSETS];
        paid[asset] = amount;
        let receipt = RedeemReceipt {
            shares,
            amounts: to_vec(&env, &paid)?,
            fee: math::to_i128(valuation.to_raw(asset, quote.fee)?)?,
            balances: state.balances.clone(),
            total_shares: state.total_shares,
        };
        PoolEvents::redeem_single(
            &env,
            &user,
            shares,
            index,
            math::to_i128(amount)?,
            receipt.fee,
            receipt.total_shares,
        );
        Ok(receipt)
    }

    /// Starts a linear ramp of the amplification towards `future_amplification`,
    /// reached at ledger `target_ledger`.
    pub fn modify_amplification(
        env: Env,
        caller: Address,
        future_amplification: u64,
        target_ledger: u64,
    ) -> Result<(), PoolError> {
        let mut state = load(&env)?;
        authorize(&state, &caller)?;

        state.ramp_amplification(future_amplification, target_ledger, height(&env))?;
        commit(&env, &state);

        PoolEvents::ramp_a(
            &env,
            &caller,
            state.amplification_current,
            state.amplification_future,
            state.amplification_block_start,
            state.amplification_block_target,
        );
        Ok(())
    }

    /// Books yield accrued by the derivative asset and any donations.
    /// Returns the booked balances afterwards.
    pub fn sync(env: Env) -> Result<Vec<i128>, PoolError> {
        let (state, _, _) = prepare(&env)?;
        commit(&env, &state);
        Ok(state.balances)
    }

    pub fn get_state(env: Env) -> Result<PoolState, PoolError> {
        load(&env)
    }

    /// Effective amplification at the current ledger, in hundredths.
    pub fn get_amplification(env: Env) -> Result<u64, PoolError> {
        load(&env)?.amplification_at(height(&env))
    }

    /// D per share of the booked balances, scaled by 10^18.
    pub fn get_virtual_price(env: Env) -> Result<i128, PoolError> {
        let state = load(&env)?;
        let reserves = booked(&state, state.amplification_at(height(&env))? as u128)?;
        math::to_i128(reserves.virtual_price()?)
    }

    /// Prices a swap against the booked balances. Yield not yet synced is
    /// left out, so the quote can trail the next `swap` by that much.
    pub fn quote_swap(
        env: Env,
        from: u32,
        to: u32,
        amount_in: i128,
    ) -> Result<SwapReceipt, PoolError> {
        let raw_in = math::to_u128(amount_in)?;
        let state = load(&env)?;
        state.share_token()?;
        let valuation = Valuation::load(&env, &state)?;
        let reserves = booked(&state, state.amplification_at(height(&env))? as u128)?;
        let (quote, amount_out, fee) =
            price_swap(&valuation, &reserves, state.config.swap_fee, from, to, raw_in)?;
        Ok(SwapReceipt {
            from,
            to,
            amount_in,
            amount_out: math::to_i128(amount_out)?,
            fee: math::to_i128(fee)?,
            balances: to_vec(&env, &quote.balances)?,
        })
    }
}
