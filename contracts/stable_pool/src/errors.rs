use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    // Argument validation.
    InvalidArgument = 102,
    IdenticalAssets = 103,
    InvalidAssetIndex = 104,
    ZeroAmount = 105,
    InsufficientLiquidity = 106,
    RampTooShort = 107,
    AmplificationOutOfBounds = 108,
    Unauthorized = 109,
    // Caller-specified minimum not met.
    SlippageExceeded = 110,
    InsufficientOutputAmount = 111,
    // Fatal; never retried.
    Arithmetic = 112,
    NotConverged = 113,
    PoolImbalanced = 114,
}
