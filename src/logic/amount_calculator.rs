use super::error::QuoteError;
use super::graph::SwapPath;
use super::pools::Pool;
use crate::utils::TokenId;
use crate::utils::fixed_point::{checked_add, checked_mul, checked_sub, mul_div, mul_div_up};
use alloy_primitives::U256;

fn insufficient_liquidity(pool: &Pool) -> QuoteError {
    QuoteError::InsufficientLiquidity(pool.key().to_string())
}

/// Constant-product output for selling `amount_in` of `token_in` into `pool`:
///
/// ```text
/// in_after_fee = amount_in * (fee_den - fee_num)
/// amount_out   = floor(reserve_out * in_after_fee / (reserve_in * fee_den + in_after_fee))
/// ```
///
/// The result is always strictly below `reserve_out`.
pub fn amount_out(pool: &Pool, token_in: &TokenId, amount_in: U256) -> Result<U256, QuoteError> {
    let (reserve_in, reserve_out) = pool.reserves_for(token_in)?;
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(insufficient_liquidity(pool));
    }

    let fee = pool.get_fee();
    let fee_denominator = U256::from(fee.denominator());
    let amount_in_after_fee = checked_mul(amount_in, U256::from(fee.denominator() - fee.numerator()))?;
    let denominator = checked_add(checked_mul(reserve_in, fee_denominator)?, amount_in_after_fee)?;

    mul_div(reserve_out, amount_in_after_fee, denominator)
}

/// Smallest input that makes `pool` pay out at least `amount_out` of the other token. Rounds up,
/// so the user is never undercharged.
pub fn amount_in(pool: &Pool, token_in: &TokenId, amount_out: U256) -> Result<U256, QuoteError> {
    let (reserve_in, reserve_out) = pool.reserves_for(token_in)?;
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(insufficient_liquidity(pool));
    }

    // ceil(reserve_in * amount_out * fee_den / ((reserve_out - amount_out) * (fee_den - fee_num)))
    let fee = pool.get_fee();
    let amount_out_scaled = checked_mul(amount_out, U256::from(fee.denominator()))?;
    let denominator = checked_mul(checked_sub(reserve_out, amount_out)?, U256::from(fee.denominator() - fee.numerator()))?;

    mul_div_up(reserve_in, amount_out_scaled, denominator)
}

/// Thread `amount_in` through every hop of `path`. A hop that pays out nothing rejects the whole
/// path with `InsufficientLiquidity`.
pub fn amount_out_along(path: &SwapPath, amount_in: U256) -> Result<U256, QuoteError> {
    let mut amount = amount_in;
    for hop in path.hops() {
        amount = amount_out(hop.pool, hop.token_in.get_id(), amount)?;
        if amount.is_zero() {
            return Err(insufficient_liquidity(hop.pool));
        }
    }
    Ok(amount)
}

/// Input required at the head of `path` to receive `amount_out` at its tail, computed backwards
/// from the last hop.
pub fn amount_in_along(path: &SwapPath, amount_out: U256) -> Result<U256, QuoteError> {
    let mut amount = amount_out;
    for hop in path.hops().collect::<Vec<_>>().into_iter().rev() {
        amount = amount_in(hop.pool, hop.token_in.get_id(), amount)?;
    }
    Ok(amount)
}
