use super::error::QuoteError;
use super::graph::{FastHashMap, SwapPath, SwapPathHash};
use super::price_impact::PriceImpactSeverity;
use crate::utils::TokenId;
use crate::utils::constants::BPS_DENOMINATOR;
use crate::utils::fixed_point::{mul_div, mul_div_up};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Token id -> numeraire (e.g. USD) price of one whole token. Only used for price impact.
pub type PriceMap = FastHashMap<TokenId, f64>;

/// Sell exactly `amount_in` of `token_in` for as much `token_out` as possible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: U256,
    /// Hop bound for this request. `None` falls back to the service's `[router] max_hops`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u8>,
}

impl QuoteRequest {
    pub fn new<T: Into<TokenId>>(token_in: T, token_out: T, amount_in: U256) -> Self {
        Self { token_in: token_in.into(), token_out: token_out.into(), amount_in, max_hops: None }
    }

    pub fn with_max_hops(self, max_hops: u8) -> Self {
        Self { max_hops: Some(max_hops), ..self }
    }
}

/// Buy exactly `amount_out` of `token_out` spending as little `token_in` as possible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactOutputRequest {
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_out: U256,
    /// Hop bound for this request. `None` falls back to the service's `[router] max_hops`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u8>,
}

impl ExactOutputRequest {
    pub fn new<T: Into<TokenId>>(token_in: T, token_out: T, amount_out: U256) -> Self {
        Self { token_in: token_in.into(), token_out: token_out.into(), amount_out, max_hops: None }
    }

    pub fn with_max_hops(self, max_hops: u8) -> Self {
        Self { max_hops: Some(max_hops), ..self }
    }
}

/// The winning route for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: U256,
    pub amount_out: U256,
    pub path: SwapPath,
    /// Percent of value lost against the spot price. `None` when it cannot be valued.
    pub price_impact: Option<f64>,
    pub severity: PriceImpactSeverity,
    pub route_hash: SwapPathHash,
}

impl Quote {
    pub fn new(path: SwapPath, amount_in: U256, amount_out: U256, price_impact: Option<f64>) -> Self {
        let token_in = path.token_in().map(|t| t.get_id().clone()).unwrap_or_default();
        let token_out = path.token_out().map(|t| t.get_id().clone()).unwrap_or_default();
        let severity = price_impact.map(PriceImpactSeverity::from_impact).unwrap_or_default();
        let route_hash = path.swap_path_hash();

        Self { token_in, token_out, amount_in, amount_out, path, price_impact, severity, route_hash }
    }

    /// Pool keys of the route, in trade order.
    pub fn route(&self) -> Vec<String> {
        self.path.pool_keys().iter().map(|key| key.to_string()).collect()
    }

    /// Lowest acceptable output at settlement for a slippage tolerance in basis points. Rounds
    /// down.
    pub fn minimum_amount_out(&self, slippage_bps: u32) -> Result<U256, QuoteError> {
        let slippage_bps = check_slippage(slippage_bps)?;
        mul_div(self.amount_out, U256::from(BPS_DENOMINATOR - slippage_bps), U256::from(BPS_DENOMINATOR))
    }

    /// Highest acceptable input at settlement for a slippage tolerance in basis points. Rounds up.
    pub fn maximum_amount_in(&self, slippage_bps: u32) -> Result<U256, QuoteError> {
        let slippage_bps = check_slippage(slippage_bps)?;
        mul_div_up(self.amount_in, U256::from(BPS_DENOMINATOR + slippage_bps), U256::from(BPS_DENOMINATOR))
    }
}

fn check_slippage(slippage_bps: u32) -> Result<u64, QuoteError> {
    let slippage_bps = slippage_bps as u64;
    if slippage_bps > BPS_DENOMINATOR {
        return Err(QuoteError::invalid_request(format!("slippage of {slippage_bps} bps exceeds 100%")));
    }
    Ok(slippage_bps)
}

/// What leaves the crate: amounts plus the route as pool-key strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub amount_in: U256,
    pub amount_out: U256,
    pub path: Vec<String>,
    pub price_impact: Option<f64>,
    pub severity: PriceImpactSeverity,
    pub route_hash: SwapPathHash,
}

impl From<&Quote> for QuoteResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            amount_in: quote.amount_in,
            amount_out: quote.amount_out,
            path: quote.route(),
            price_impact: quote.price_impact,
            severity: quote.severity,
            route_hash: quote.route_hash,
        }
    }
}
