#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

mod errors;
mod storage;

#[cfg(test)]
mod test;

pub use errors::ShareTokenError;

use soroban_sdk::{contract, contractimpl, Address, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};
use storage::AllowanceEntry;

/// Pool-share ledger. The admin (the stable pool) is the only minter; holders
/// burn their own shares when redeeming.
#[contract]
pub struct ShareToken;

fn check_amount(amount: i128) -> Result<(), ShareTokenError> {
    if amount < 0 {
        return Err(ShareTokenError::InvalidAmount);
    }
    Ok(())
}

fn spend_balance(env: &Env, from: &Address, amount: i128) -> Result<(), ShareTokenError> {
    let balance = storage::get_balance(env, from);
    if balance < amount {
        return Err(ShareTokenError::InsufficientBalance);
    }
    storage::set_balance(env, from, balance - amount);
    Ok(())
}

fn receive_balance(env: &Env, to: &Address, amount: i128) -> Result<(), ShareTokenError> {
    let balance = storage::get_balance(env, to)
        .checked_add(amount)
        .ok_or(ShareTokenError::Overflow)?;
    storage::set_balance(env, to, balance);
    Ok(())
}

fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), ShareTokenError> {
    let allowance = storage::get_allowance(env, from, spender);
    if allowance.amount < amount {
        return Err(ShareTokenError::InsufficientAllowance);
    }
    if amount > 0 {
        storage::set_allowance(
            env,
            from,
            spender,
            &AllowanceEntry {
                amount: allowance.amount - amount,
                expiration_ledger: allowance.expiration_ledger,
            },
        );
    }
    Ok(())
}

#[contractimpl]
impl ShareToken {
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), ShareTokenError> {
        if storage::has_admin(&env) {
            return Err(ShareTokenError::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: decimals,
            name,
            symbol,
        });
        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, ShareTokenError> {
        storage::get_admin(&env)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &from, &spender).amount
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), ShareTokenError> {
        from.require_auth();
        check_amount(amount)?;
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(ShareTokenError::InvalidExpiration);
        }
        storage::extend_instance_ttl(&env);

        storage::set_allowance(
            &env,
            &from,
            &spender,
            &AllowanceEntry {
                amount,
                expiration_ledger,
            },
        );
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        from.require_auth();
        check_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_balance(&env, &from, amount)?;
        receive_balance(&env, &to, amount)?;
        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        spender.require_auth();
        check_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_allowance(&env, &from, &spender, amount)?;
        spend_balance(&env, &from, amount)?;
        receive_balance(&env, &to, amount)?;
        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    /// Issues new shares. Only the admin may mint.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), ShareTokenError> {
        check_amount(amount)?;
        let admin = storage::get_admin(&env)?;
        admin.require_auth();
        storage::extend_instance_ttl(&env);

        receive_balance(&env, &to, amount)?;
        let supply = storage::get_total_supply(&env)
            .checked_add(amount)
            .ok_or(ShareTokenError::Overflow)?;
        storage::set_total_supply(&env, supply);
        TokenUtils::new(&env).events().mint(admin, to, amount);
        Ok(())
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ShareTokenError> {
        from.require_auth();
        check_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_balance(&env, &from, amount)?;
        storage::set_total_supply(&env, storage::get_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
        Ok(())
    }

    pub fn burn_from(
        env: Env,
        spender: Address,
        from: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        spender.require_auth();
        check_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_allowance(&env, &from, &spender, amount)?;
        spend_balance(&env, &from, amount)?;
        storage::set_total_supply(&env, storage::get_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
        Ok(())
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }
}
