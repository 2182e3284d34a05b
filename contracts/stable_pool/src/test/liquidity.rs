use crate::{
    errors::PoolError,
    liquidity::{compute_deposit, compute_redeem_proportional, compute_redeem_single},
    math::Reserves,
    swap::compute_swap,
};

const AMP: u128 = 1_000;

fn empty() -> Reserves {
    Reserves {
        balances: [0, 0],
        total_shares: 0,
        amplification: AMP,
    }
}

fn balanced() -> Reserves {
    Reserves {
        balances: [100_000_000, 100_000_000],
        total_shares: 200_000_000,
        amplification: AMP,
    }
}

// ---------------------------------------------------------------------------
// deposit
// ---------------------------------------------------------------------------

#[test]
fn first_deposit_mints_the_invariant() {
    let deposit = compute_deposit(&empty(), &[100_000_000, 100_000_000], 0).unwrap();
    assert_eq!(deposit.shares, 200_000_000);
    assert_eq!(deposit.fee, 0);
    assert_eq!(deposit.balances, [100_000_000, 100_000_000]);
    assert_eq!(deposit.total_shares, 200_000_000);
}

#[test]
fn first_deposit_is_fee_free() {
    let deposit = compute_deposit(&empty(), &[100_000_000, 100_000_000], 50_000_000).unwrap();
    assert_eq!(deposit.shares, 200_000_000);
}

#[test]
fn first_deposit_must_seed_both_assets() {
    assert_eq!(
        compute_deposit(&empty(), &[100_000_000, 0], 0),
        Err(PoolError::InvalidArgument)
    );
}

#[test]
fn empty_deposit_is_rejected() {
    assert_eq!(
        compute_deposit(&balanced(), &[0, 0], 0),
        Err(PoolError::ZeroAmount)
    );
}

#[test]
fn proportional_deposit_mints_proportional_shares() {
    let deposit = compute_deposit(&balanced(), &[1_000_000, 1_000_000], 0).unwrap();
    assert_eq!(deposit.shares, 2_000_000);
    assert_eq!(deposit.total_shares, 202_000_000);
}

#[test]
fn imbalanced_deposit_mints_less_than_its_face_value() {
    let deposit = compute_deposit(&balanced(), &[2_000_000, 0], 0).unwrap();
    assert_eq!(deposit.shares, 1_999_528);
    assert_eq!(deposit.balances, [102_000_000, 100_000_000]);
}

#[test]
fn mint_fee_withholds_shares() {
    // 0.5%
    let deposit = compute_deposit(&balanced(), &[1_000_000, 1_000_000], 50_000_000).unwrap();
    assert_eq!(deposit.fee, 10_000);
    assert_eq!(deposit.shares, 1_990_000);
    assert_eq!(deposit.total_shares, 201_990_000);
}

// ---------------------------------------------------------------------------
// proportional redemption
// ---------------------------------------------------------------------------

#[test]
fn proportional_redemption_pays_each_asset_pro_rata() {
    let redemption = compute_redeem_proportional(&balanced(), 1_000_000).unwrap();
    assert_eq!(redemption.amounts, [500_000, 500_000]);
    assert_eq!(redemption.fee, 0);
    assert_eq!(redemption.balances, [99_500_000, 99_500_000]);
    assert_eq!(redemption.total_shares, 199_000_000);
}

#[test]
fn redeposit_after_proportional_redemption_restores_supply() {
    let before = balanced();
    let redemption = compute_redeem_proportional(&before, 1_000_000).unwrap();
    let after = Reserves {
        balances: redemption.balances,
        total_shares: redemption.total_shares,
        amplification: AMP,
    };
    let deposit = compute_deposit(&after, &redemption.amounts, 0).unwrap();
    assert_eq!(deposit.total_shares, before.total_shares);
}

#[test]
fn redeeming_everything_empties_the_pool() {
    let redemption = compute_redeem_proportional(&balanced(), 200_000_000).unwrap();
    assert_eq!(redemption.balances, [0, 0]);
    assert_eq!(redemption.total_shares, 0);
}

#[test]
fn redeeming_more_than_supply_is_rejected() {
    assert_eq!(
        compute_redeem_proportional(&balanced(), 200_000_001),
        Err(PoolError::InsufficientLiquidity)
    );
    assert_eq!(
        compute_redeem_proportional(&balanced(), 0),
        Err(PoolError::ZeroAmount)
    );
}

// ---------------------------------------------------------------------------
// single-asset redemption
// ---------------------------------------------------------------------------

#[test]
fn single_redemption_without_fee() {
    let redemption = compute_redeem_single(&balanced(), 1_000_000, 1, 0).unwrap();
    assert_eq!(redemption.amounts, [0, 999_880]);
    assert_eq!(redemption.fee, 0);
    assert_eq!(redemption.balances, [100_000_000, 99_000_120]);
    assert_eq!(redemption.total_shares, 199_000_000);
}

#[test]
fn single_redemption_charges_the_imbalance_fee() {
    // 0.3%
    let redemption = compute_redeem_single(&balanced(), 1_000_000, 1, 30_000_000).unwrap();
    assert_eq!(redemption.amounts, [0, 998_381]);
    assert_eq!(redemption.fee, 1_499);

    // Less than the proportional-equivalent withdrawal and the balance held.
    assert!(redemption.amounts[1] < 1_000_000);
    assert!(redemption.amounts[1] < 100_000_000);
}

#[test]
fn single_redemption_is_symmetric_in_a_balanced_pool() {
    let first = compute_redeem_single(&balanced(), 1_000_000, 0, 30_000_000).unwrap();
    let second = compute_redeem_single(&balanced(), 1_000_000, 1, 30_000_000).unwrap();
    assert_eq!(first.amounts[0], second.amounts[1]);
}

#[test]
fn single_redemption_keeps_virtual_price() {
    let before = balanced();
    let redemption = compute_redeem_single(&before, 1_000_000, 1, 30_000_000).unwrap();
    let after = Reserves {
        balances: redemption.balances,
        total_shares: redemption.total_shares,
        amplification: AMP,
    };
    assert!(after.virtual_price().unwrap() >= before.virtual_price().unwrap());
}

#[test]
fn single_redemption_of_the_whole_supply_is_rejected() {
    assert_eq!(
        compute_redeem_single(&balanced(), 200_000_000, 0, 0),
        Err(PoolError::InsufficientLiquidity)
    );
}

#[test]
fn single_redemption_rejects_unknown_asset() {
    assert_eq!(
        compute_redeem_single(&balanced(), 1_000, 2, 0),
        Err(PoolError::InvalidAssetIndex)
    );
}

// ---------------------------------------------------------------------------
// mixed sequences
// ---------------------------------------------------------------------------

const SWAP_FEE: u128 = 4_000_000;
const REDEEM_FEE: u128 = 5_000_000;

/// Knuth's MMIX constants; the high bits are the usable ones.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u128 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        u128::from(self.0 >> 33)
    }
}

#[test]
fn random_operation_sequences_keep_solving_and_never_dilute_shares() {
    for seed in 0..8u64 {
        for amplification in [100, 1_000, 10_000] {
            let mut rng = Lcg(seed);
            let seed_deposit = compute_deposit(
                &Reserves {
                    balances: [0, 0],
                    total_shares: 0,
                    amplification,
                },
                &[100_000_000, 100_000_000],
                0,
            )
            .unwrap();
            let mut reserves = Reserves {
                balances: seed_deposit.balances,
                total_shares: seed_deposit.total_shares,
                amplification,
            };

            for step in 0..64 {
                let d_before = reserves.invariant().unwrap();
                let shares_before = reserves.total_shares;

                let outcome = match rng.next() % 4 {
                    0 => {
                        let amounts = [
                            rng.next() % (reserves.balances[0] / 10 + 1),
                            rng.next() % (reserves.balances[1] / 10 + 1),
                        ];
                        compute_deposit(&reserves, &amounts, 0)
                            .map(|deposit| (deposit.balances, deposit.total_shares))
                    }
                    1 => {
                        // Up to twice the input side, so the pool drifts far from balance.
                        let from = (rng.next() % 2) as usize;
                        let amount = rng.next() % (reserves.balances[from] * 2) + 1;
                        compute_swap(&reserves, from, 1 - from, amount, SWAP_FEE)
                            .map(|swap| (swap.balances, reserves.total_shares))
                    }
                    2 => {
                        let shares = rng.next() % (reserves.total_shares / 10) + 1;
                        compute_redeem_proportional(&reserves, shares)
                            .map(|redemption| (redemption.balances, redemption.total_shares))
                    }
                    _ => {
                        let shares = rng.next() % (reserves.total_shares / 20) + 1;
                        let index = (rng.next() % 2) as usize;
                        compute_redeem_single(&reserves, shares, index, REDEEM_FEE)
                            .map(|redemption| (redemption.balances, redemption.total_shares))
                    }
                };

                let (balances, total_shares) = match outcome {
                    Ok(next) => next,
                    // Dust that rounds to nothing.
                    Err(PoolError::InsufficientOutputAmount | PoolError::ZeroAmount) => continue,
                    Err(err) => panic!("seed {seed}, A {amplification}, step {step}: {err:?}"),
                };
                reserves = Reserves {
                    balances,
                    total_shares,
                    amplification,
                };

                // D per share may only drop by solver rounding, under one unit of D.
                let d_after = reserves.invariant().unwrap();
                assert!(
                    d_after * shares_before + shares_before >= d_before * total_shares,
                    "seed {seed}, A {amplification}, step {step}: {d_before}/{shares_before} -> {d_after}/{total_shares}"
                );
            }
        }
    }
}
