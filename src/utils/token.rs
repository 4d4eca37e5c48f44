use crate::logic::error::QuoteError;
use crate::utils::constants::{HTR, MAX_DECIMALS};
use crate::utils::fixed_point::u256_to_f64;
use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable token identifier. Never reused, compared byte-wise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        TokenId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        TokenId(id.to_string())
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        TokenId(id)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    #[serde(deserialize_with = "deserialize_decimals")]
    decimals: u8,
    name: Option<String>,
    symbol: Option<String>,
}

pub type TokenWrapper = Arc<Token>;

fn deserialize_decimals<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let decimals = u8::deserialize(deserializer)?;
    if decimals > MAX_DECIMALS {
        return Err(serde::de::Error::custom(format!("decimals must be at most {MAX_DECIMALS}, got {decimals}")));
    }
    Ok(decimals)
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Token {
    pub fn new<T: Into<TokenId>>(id: T) -> Token {
        Token { id: id.into(), decimals: 18, ..Token::default() }
    }

    /// Decimals above [`MAX_DECIMALS`] are capped so `get_exp` stays exact.
    pub fn new_with_data<T: Into<TokenId>>(id: T, symbol: Option<String>, name: Option<String>, decimals: Option<u8>) -> Token {
        Token { id: id.into(), symbol, name, decimals: decimals.unwrap_or(18).min(MAX_DECIMALS) }
    }

    pub fn get_id(&self) -> &TokenId {
        &self.id
    }

    pub fn get_symbol(&self) -> String {
        self.symbol.clone().unwrap_or(self.id.to_string())
    }

    pub fn get_name(&self) -> String {
        self.name.clone().unwrap_or(self.id.to_string())
    }

    pub fn get_decimals(&self) -> u8 {
        self.decimals
    }

    /// `10^decimals`, the number of smallest units in one whole token.
    pub fn get_exp(&self) -> U256 {
        U256::from(10u64).pow(U256::from(self.decimals))
    }

    pub fn to_float(&self, value: U256) -> f64 {
        if self.decimals == 0 {
            return u256_to_f64(value);
        }
        let (div, rem) = value.div_rem(self.get_exp());
        u256_to_f64(div) + u256_to_f64(rem) / 10f64.powi(self.decimals as i32)
    }

    /// Parse a human decimal string ("12.5") into smallest units without going through floats.
    pub fn parse_units(&self, value: &str) -> Result<U256, QuoteError> {
        let value = value.trim();
        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(QuoteError::invalid_request(format!("empty amount for token {}", self.id)));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(QuoteError::invalid_request(format!("malformed amount {value:?}")));
        }
        if fraction.len() > self.decimals as usize {
            return Err(QuoteError::invalid_request(format!(
                "amount {value:?} has more than {} fractional digits",
                self.decimals
            )));
        }

        let padded = format!("{whole}{fraction:0<width$}", width = self.decimals as usize);
        let digits = padded.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(digits, 10).map_err(|_| QuoteError::ArithmeticOverflow)
    }

    pub fn is_native(&self) -> bool {
        self.id.as_str() == HTR
    }
}
