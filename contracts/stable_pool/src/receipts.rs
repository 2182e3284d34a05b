use soroban_sdk::{contracttype, Vec};

/// Result of `deposit`. `amounts` are the raw token amounts pulled in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositReceipt {
    pub amounts: Vec<i128>,
    pub shares: i128,
    pub fee: i128,
    pub balances: Vec<i128>,
    pub total_shares: i128,
}

/// Result of `swap` and `quote_swap`. `fee` is in raw units of the output
/// asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapReceipt {
    pub from: u32,
    pub to: u32,
    pub amount_in: i128,
    pub amount_out: i128,
    pub fee: i128,
    pub balances: Vec<i128>,
}

/// Result of both redemption paths. `amounts` are raw token amounts paid out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemReceipt {
    pub shares: i128,
    pub amounts: Vec<i128>,
    pub fee: i128,
    pub balances: Vec<i128>,
    pub total_shares: i128,
}
