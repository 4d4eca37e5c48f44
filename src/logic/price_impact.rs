use super::graph::SwapPath;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, VariantNames};

pub const PRICE_IMPACT_LOW: f64 = 1.0;
pub const PRICE_IMPACT_MEDIUM: f64 = 3.0;
pub const PRICE_IMPACT_HIGH: f64 = 5.0;
/// From here on the user has to explicitly acknowledge the trade.
pub const PRICE_IMPACT_REQUIRES_CONFIRMATION: f64 = 10.0;
/// From here on the trade is blocked for non-expert users.
pub const PRICE_IMPACT_BLOCKED: f64 = 15.0;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, VariantNames, Default, Deserialize, Serialize, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PriceImpactSeverity {
    #[default]
    None,
    Low,
    Medium,
    High,
    RequiresConfirmation,
    Blocked,
}

impl PriceImpactSeverity {
    /// First tier whose threshold the impact reaches, most severe first. Negative or undefined
    /// impact has no severity.
    pub fn from_impact(price_impact: f64) -> Self {
        if price_impact >= PRICE_IMPACT_BLOCKED {
            PriceImpactSeverity::Blocked
        } else if price_impact >= PRICE_IMPACT_REQUIRES_CONFIRMATION {
            PriceImpactSeverity::RequiresConfirmation
        } else if price_impact >= PRICE_IMPACT_HIGH {
            PriceImpactSeverity::High
        } else if price_impact >= PRICE_IMPACT_MEDIUM {
            PriceImpactSeverity::Medium
        } else if price_impact >= PRICE_IMPACT_LOW {
            PriceImpactSeverity::Low
        } else {
            PriceImpactSeverity::None
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        *self >= PriceImpactSeverity::RequiresConfirmation
    }

    pub fn is_blocked(&self) -> bool {
        *self == PriceImpactSeverity::Blocked
    }
}

/// Percentage of value lost between what goes in and what comes out of `path`:
///
/// ```text
/// input_value  = to_float(amount_in)  * spot_price_in
/// output_value = to_float(amount_out) * spot_price_out
/// impact       = (input_value - output_value) / input_value * 100
/// ```
///
/// Amounts are scaled to whole tokens with the decimals of the path's first and last token.
/// Returns `None` when the input value is not positive, since the ratio is undefined there.
pub fn evaluate(path: &SwapPath, amount_in: U256, amount_out: U256, spot_price_in: f64, spot_price_out: f64) -> Option<f64> {
    let token_in = path.token_in()?;
    let token_out = path.token_out()?;

    let input_value = token_in.to_float(amount_in) * spot_price_in;
    let output_value = token_out.to_float(amount_out) * spot_price_out;

    if input_value.is_nan() || input_value <= 0.0 {
        return None;
    }

    Some((input_value - output_value) / input_value * 100.0)
}

/// Mid price of `path`: how many whole `token_out` one whole `token_in` buys at the current
/// reserve ratios, before fees and slippage. `None` if any hop has no liquidity.
pub fn path_spot_price(path: &SwapPath) -> Option<f64> {
    if path.is_empty() {
        return None;
    }

    path.hops().try_fold(1f64, |price, hop| {
        let hop_price = hop.pool.spot_price(hop.token_in.get_id())?;
        let decimals_shift = hop.token_in.get_decimals() as i32 - hop.token_out.get_decimals() as i32;
        Some(price * hop_price * 10f64.powi(decimals_shift))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::pools::{Fee, Pool, PoolWrapper};
    use crate::utils::Token;
    use crate::utils::constants::HTR;
    use std::sync::Arc;
    use strum::IntoEnumIterator;

    fn single_hop(token_in: Token, token_out: Token, reserve_in: u64, reserve_out: u64) -> SwapPath {
        let pool = Pool::new(
            token_in.get_id().clone(),
            token_out.get_id().clone(),
            U256::from(reserve_in),
            U256::from(reserve_out),
            Fee::new(5, 1000).unwrap(),
            true,
        )
        .unwrap();
        SwapPath::new_first(Arc::new(token_in), Arc::new(token_out), PoolWrapper::from(pool))
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(PriceImpactSeverity::from_impact(0.0), PriceImpactSeverity::None);
        assert_eq!(PriceImpactSeverity::from_impact(0.99), PriceImpactSeverity::None);
        assert_eq!(PriceImpactSeverity::from_impact(1.0), PriceImpactSeverity::Low);
        assert_eq!(PriceImpactSeverity::from_impact(3.0), PriceImpactSeverity::Medium);
        assert_eq!(PriceImpactSeverity::from_impact(4.99), PriceImpactSeverity::Medium);
        assert_eq!(PriceImpactSeverity::from_impact(5.0), PriceImpactSeverity::High);
        assert_eq!(PriceImpactSeverity::from_impact(12.0), PriceImpactSeverity::RequiresConfirmation);
        assert_eq!(PriceImpactSeverity::from_impact(15.0), PriceImpactSeverity::Blocked);
        assert_eq!(PriceImpactSeverity::from_impact(99.0), PriceImpactSeverity::Blocked);
        assert_eq!(PriceImpactSeverity::from_impact(-4.0), PriceImpactSeverity::None);
        assert_eq!(PriceImpactSeverity::from_impact(f64::NAN), PriceImpactSeverity::None);
    }

    #[test]
    fn test_severity_is_ordered() {
        let tiers: Vec<_> = PriceImpactSeverity::iter().collect();
        assert!(tiers.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(PriceImpactSeverity::RequiresConfirmation.requires_confirmation());
        assert!(PriceImpactSeverity::Blocked.requires_confirmation());
        assert!(!PriceImpactSeverity::High.requires_confirmation());
        assert!(PriceImpactSeverity::Blocked.is_blocked());
    }

    #[test]
    fn test_severity_names() -> eyre::Result<()> {
        assert_eq!(PriceImpactSeverity::RequiresConfirmation.to_string(), "requires_confirmation");
        assert_eq!("blocked".parse::<PriceImpactSeverity>()?, PriceImpactSeverity::Blocked);
        assert_eq!(serde_json::to_string(&PriceImpactSeverity::None)?, "\"none\"");
        Ok(())
    }

    #[test]
    fn test_trade_at_spot_price_has_no_impact() {
        let path = single_hop(Token::new("00"), Token::new("0a"), 1_000_000, 1_000_000);
        let impact = evaluate(&path, U256::from(1_000), U256::from(1_000), 1.0, 1.0).unwrap();

        assert_eq!(impact, 0.0);
        assert_eq!(PriceImpactSeverity::from_impact(impact), PriceImpactSeverity::None);
    }

    #[test]
    fn test_twelve_percent_loss_requires_confirmation() {
        let path = single_hop(Token::new("00"), Token::new("0a"), 1_000_000, 1_000_000);
        let impact = evaluate(&path, U256::from(100), U256::from(88), 1.0, 1.0).unwrap();

        assert!((impact - 12.0).abs() < 1e-9);
        assert_eq!(PriceImpactSeverity::from_impact(impact), PriceImpactSeverity::RequiresConfirmation);
    }

    #[test]
    fn test_evaluate_uses_token_decimals() {
        let usd = Token::new_with_data("0a", Some("USD".to_string()), None, Some(2));
        let htr = Token::new_with_data(HTR, Some("HTR".to_string()), None, Some(2));
        let path = single_hop(htr, usd, 1_000_000, 1_000_000);

        // 10.00 HTR at 0.04 in, 0.38 USD at 1.00 out
        let impact = evaluate(&path, U256::from(1_000), U256::from(38), 0.04, 1.0).unwrap();
        assert!((impact - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_undefined_input_value() {
        let path = single_hop(Token::new("00"), Token::new("0a"), 1_000_000, 1_000_000);
        assert_eq!(evaluate(&path, U256::ZERO, U256::from(10), 1.0, 1.0), None);
        assert_eq!(evaluate(&path, U256::from(10), U256::from(10), 0.0, 1.0), None);
        assert_eq!(evaluate(&path, U256::from(10), U256::from(10), -1.0, 1.0), None);
        assert_eq!(evaluate(&SwapPath::default(), U256::from(10), U256::from(10), 1.0, 1.0), None);
    }

    #[test]
    fn test_path_spot_price() {
        let path = single_hop(Token::new(HTR), Token::new("0a"), 1_000_000, 500_000);
        assert_eq!(path_spot_price(&path), Some(0.5));

        // 1 whole token with 2 decimals against 1 whole token with 4 decimals
        let usd = Token::new_with_data("0b", None, None, Some(4));
        let cents = Token::new_with_data("0c", None, None, Some(2));
        let path = single_hop(cents, usd, 100, 10_000);
        assert!((path_spot_price(&path).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spot_price_of_fixture_trade() -> eyre::Result<()> {
        // 10_000 HTR in, 4925 out against a mid price of 0.5
        let path = single_hop(Token::new(HTR), Token::new("0a"), 1_000_000, 500_000);
        let spot = path_spot_price(&path).unwrap();
        let impact = evaluate(&path, U256::from(10_000), U256::from(4925), spot, 1.0).unwrap();

        assert!((impact - 1.5).abs() < 1e-9);
        assert_eq!(PriceImpactSeverity::from_impact(impact), PriceImpactSeverity::Low);
        Ok(())
    }
}
