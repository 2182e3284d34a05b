use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

pub struct PoolEvents;

impl PoolEvents {
    /// Emits `create` once the pool parameters are stored.
    ///
    /// Topics: `("create", authority)`
    /// Data:   `(native_token, derivative_token, amplification)`
    pub fn create(
        env: &Env,
        authority: &Address,
        native_token: &Address,
        derivative_token: &Address,
        amplification: u64,
    ) {
        env.events().publish(
            (symbol_short!("create"), authority),
            (native_token, derivative_token, amplification),
        );
    }

    pub fn shares(env: &Env, authority: &Address, share_token: &Address, decimals: u32) {
        env.events()
            .publish((symbol_short!("shares"), authority), (share_token, decimals));
    }

    /// Topics: `("mint", user)`
    /// Data:   `(amounts, shares, fee, total_shares)`
    pub fn mint(
        env: &Env,
        user: &Address,
        amounts: &Vec<i128>,
        shares: i128,
        fee: i128,
        total_shares: i128,
    ) {
        env.events().publish(
            (symbol_short!("mint"), user),
            (amounts.clone(), shares, fee, total_shares),
        );
    }

    /// Topics: `("swap", user)`
    /// Data:   `(from, to, amount_in, amount_out, fee)`
    pub fn swap(
        env: &Env,
        user: &Address,
        from: u32,
        to: u32,
        amount_in: i128,
        amount_out: i128,
        fee: i128,
    ) {
        env.events().publish(
            (symbol_short!("swap"), user),
            (from, to, amount_in, amount_out, fee),
        );
    }

    pub fn redeem(env: &Env, user: &Address, shares: i128, amounts: &Vec<i128>, total_shares: i128) {
        env.events().publish(
            (symbol_short!("redeem"), user),
            (shares, amounts.clone(), total_shares),
        );
    }

    /// "redeem_single" is longer than nine characters, so the topic is built
    /// with `Symbol::new`.
    ///
    /// Topics: `("redeem_single", user)`
    /// Data:   `(shares, index, amount, fee, total_shares)`
    pub fn redeem_single(
        env: &Env,
        user: &Address,
        shares: i128,
        index: u32,
        amount: i128,
        fee: i128,
        total_shares: i128,
    ) {
        env.events().publish(
            (Symbol::new(env, "redeem_single"), user),
            (shares, index, amount, fee, total_shares),
        );
    }

    /// Topics: `("ramp_a", authority)`
    /// Data:   `(current, future, block_start, block_target)`
    pub fn ramp_a(
        env: &Env,
        authority: &Address,
        current: u64,
        future: u64,
        block_start: u64,
        block_target: u64,
    ) {
        env.events().publish(
            (symbol_short!("ramp_a"), authority),
            (current, future, block_start, block_target),
        );
    }

    pub fn sync(env: &Env, d_before: i128, d_after: i128, balances: &Vec<i128>) {
        env.events()
            .publish((symbol_short!("sync"),), (d_before, d_after, balances.clone()));
    }
}
