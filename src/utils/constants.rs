/// Token id of the chain's native token.
pub const HTR: &str = "00";

pub const DEFAULT_MAX_HOPS: u8 = 3;

/// Upper bound on candidate paths a single enumeration may yield.
pub const DEFAULT_MAX_PATHS: usize = 50_000;

/// Fee denominator used by the snapshot source when none is given (fee 5 = 0.5%).
pub const DEFAULT_FEE_DENOMINATOR: u64 = 1_000;

/// Slippage tolerances are given in basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// `10^77` is the largest power of ten below `2^256`.
pub const MAX_DECIMALS: u8 = 77;
