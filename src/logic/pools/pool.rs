use super::pool_key::{FeeTier, PoolKey};
use crate::logic::error::QuoteError;
use crate::utils::TokenId;
use crate::utils::constants::DEFAULT_FEE_DENOMINATOR;
use crate::utils::fixed_point::u256_to_f64;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Swap fee as an exact rational, e.g. `5/1000` for 0.5%.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFee")]
pub struct Fee {
    numerator: u64,
    denominator: u64,
}

#[derive(Deserialize)]
struct RawFee {
    numerator: u64,
    #[serde(default = "default_fee_denominator")]
    denominator: u64,
}

fn default_fee_denominator() -> u64 {
    DEFAULT_FEE_DENOMINATOR
}

impl TryFrom<RawFee> for Fee {
    type Error = QuoteError;

    fn try_from(raw: RawFee) -> Result<Self, Self::Error> {
        Fee::new(raw.numerator, raw.denominator)
    }
}

impl Fee {
    pub const ZERO: Fee = Fee { numerator: 0, denominator: 1 };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, QuoteError> {
        if denominator == 0 {
            return Err(QuoteError::InvalidPool("fee denominator must be positive".to_string()));
        }
        if numerator >= denominator {
            return Err(QuoteError::InvalidPool(format!("fee {numerator}/{denominator} must be below 100%")));
        }
        Ok(Fee { numerator, denominator })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn tier(&self) -> FeeTier {
        FeeTier::new(self.numerator, self.denominator)
    }

    pub fn as_percent(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64 * 100.0
    }
}

impl Display for Fee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// One constant-product pool from the caller's snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolSnapshot", into = "PoolSnapshot")]
pub struct Pool {
    token0: TokenId,
    token1: TokenId,
    reserve0: U256,
    reserve1: U256,
    fee: Fee,
    active: bool,
}

/// Unvalidated wire form of a [`Pool`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub token0: TokenId,
    pub token1: TokenId,
    pub reserve0: U256,
    pub reserve1: U256,
    pub fee: Fee,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<PoolSnapshot> for Pool {
    type Error = QuoteError;

    fn try_from(snapshot: PoolSnapshot) -> Result<Self, Self::Error> {
        Pool::new(snapshot.token0, snapshot.token1, snapshot.reserve0, snapshot.reserve1, snapshot.fee, snapshot.active)
    }
}

impl From<Pool> for PoolSnapshot {
    fn from(pool: Pool) -> Self {
        PoolSnapshot {
            token0: pool.token0,
            token1: pool.token1,
            reserve0: pool.reserve0,
            reserve1: pool.reserve1,
            fee: pool.fee,
            active: pool.active,
        }
    }
}

impl Pool {
    pub fn new<T: Into<TokenId>>(token0: T, token1: T, reserve0: U256, reserve1: U256, fee: Fee, active: bool) -> Result<Self, QuoteError> {
        let token0 = token0.into();
        let token1 = token1.into();
        if token0 == token1 {
            return Err(QuoteError::InvalidPool(format!("pool tokens must differ, got {token0} twice")));
        }
        // `/` separates the parts of a pool key
        for token in [&token0, &token1] {
            if token.as_str().is_empty() || token.as_str().contains(PoolKey::SEPARATOR) {
                return Err(QuoteError::InvalidPool(format!("token id '{token}' must be non-empty and free of '{}'", PoolKey::SEPARATOR)));
            }
        }
        Ok(Pool { token0, token1, reserve0, reserve1, fee, active })
    }

    pub fn get_token0(&self) -> &TokenId {
        &self.token0
    }

    pub fn get_token1(&self) -> &TokenId {
        &self.token1
    }

    pub fn get_reserves(&self) -> (U256, U256) {
        (self.reserve0, self.reserve1)
    }

    pub fn get_fee(&self) -> Fee {
        self.fee
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Only active pools with liquidity on both sides take part in routing.
    pub fn is_tradeable(&self) -> bool {
        self.active && !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }

    pub fn key(&self) -> PoolKey {
        PoolKey::new(self.token0.clone(), self.token1.clone(), self.fee.tier())
    }

    pub fn get_tokens(&self) -> Vec<TokenId> {
        vec![self.token0.clone(), self.token1.clone()]
    }

    pub fn get_swap_directions(&self) -> Vec<(TokenId, TokenId)> {
        vec![(self.token0.clone(), self.token1.clone()), (self.token1.clone(), self.token0.clone())]
    }

    pub fn contains_token(&self, token: &TokenId) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    pub fn other_token(&self, token: &TokenId) -> Option<&TokenId> {
        if self.token0 == *token {
            Some(&self.token1)
        } else if self.token1 == *token {
            Some(&self.token0)
        } else {
            None
        }
    }

    /// `(reserve_in, reserve_out)` for a trade that sells `token_in`.
    pub fn reserves_for(&self, token_in: &TokenId) -> Result<(U256, U256), QuoteError> {
        if self.token0 == *token_in {
            Ok((self.reserve0, self.reserve1))
        } else if self.token1 == *token_in {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(QuoteError::invalid_request(format!("token {token_in} is not part of pool {}", self.key())))
        }
    }

    /// Instantaneous reserve ratio `reserve_out / reserve_in` in smallest units, or `None` without
    /// liquidity.
    pub fn spot_price(&self, token_in: &TokenId) -> Option<f64> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in).ok()?;
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return None;
        }
        Some(u256_to_f64(reserve_out) / u256_to_f64(reserve_in))
    }
}

/// Cheap shared handle to a snapshot pool, compared and hashed by pool key.
pub struct PoolWrapper {
    pub pool: Arc<Pool>,
}

impl PartialOrd for PoolWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for PoolWrapper {}

impl Ord for PoolWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Display for PoolWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Debug for PoolWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (reserve0, reserve1) = self.get_reserves();
        write!(f, "Pool({}, reserves={}/{}, active={})", self.key(), reserve0, reserve1, self.is_active())
    }
}

impl Hash for PoolWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl PartialEq for PoolWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl PoolWrapper {
    pub fn new(pool: Arc<Pool>) -> Self {
        PoolWrapper { pool }
    }
}

impl Clone for PoolWrapper {
    fn clone(&self) -> Self {
        Self { pool: self.pool.clone() }
    }
}

impl Deref for PoolWrapper {
    type Target = Pool;

    fn deref(&self) -> &Self::Target {
        self.pool.deref()
    }
}

impl From<Pool> for PoolWrapper {
    fn from(pool: Pool) -> Self {
        Self { pool: Arc::new(pool) }
    }
}
