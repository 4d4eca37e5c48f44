use crate::utils::TokenId;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

const PPM: u64 = 1_000_000;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A fee reduced to lowest terms so `5/1000` and `50/10000` are the same tier. Only built from a
/// validated [`Fee`](super::Fee), so the denominator is never zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeeTier {
    numerator: u64,
    denominator: u64,
}

impl FeeTier {
    pub(crate) fn new(numerator: u64, denominator: u64) -> Self {
        let divisor = gcd(numerator, denominator).max(1);
        FeeTier { numerator: numerator / divisor, denominator: denominator / divisor }
    }
}

/// Renders as parts per million (`5/1000` -> `5000`) or as `n:d` when ppm is not exact.
impl Display for FeeTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if PPM % self.denominator == 0 {
            write!(f, "{}", self.numerator * (PPM / self.denominator))
        } else {
            write!(f, "{}:{}", self.numerator, self.denominator)
        }
    }
}

/// Unordered `(token, token, fee tier)` identity of a pool. Tokens are stored sorted, so the
/// canonical string `tokenA/tokenB/feeTier` does not depend on snapshot orientation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolKey {
    token_a: TokenId,
    token_b: TokenId,
    fee_tier: FeeTier,
}

impl PoolKey {
    pub const SEPARATOR: char = '/';

    pub fn new(token0: TokenId, token1: TokenId, fee_tier: FeeTier) -> Self {
        if token0 <= token1 {
            PoolKey { token_a: token0, token_b: token1, fee_tier }
        } else {
            PoolKey { token_a: token1, token_b: token0, fee_tier }
        }
    }

    pub fn tokens(&self) -> (&TokenId, &TokenId) {
        (&self.token_a, &self.token_b)
    }

    pub fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}

impl Display for PoolKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{sep}{}{sep}{}", self.token_a, self.token_b, self.fee_tier, sep = Self::SEPARATOR)
    }
}

impl Serialize for PoolKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
