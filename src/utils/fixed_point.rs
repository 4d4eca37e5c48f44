use crate::logic::error::QuoteError;
use alloy_primitives::{U256, Uint};

/// 512-bit intermediate so `a * b` never overflows before the division.
type U512 = Uint<512, 8>;

fn widen(value: U256) -> U512 {
    let [l0, l1, l2, l3] = *value.as_limbs();
    U512::from_limbs([l0, l1, l2, l3, 0, 0, 0, 0])
}

fn narrow(value: U512) -> Result<U256, QuoteError> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(QuoteError::ArithmeticOverflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// `floor(a * b / denominator)`.
///
/// Fails with `DivisionByZero` when `denominator` is zero and with `ArithmeticOverflow` when the
/// quotient does not fit in 256 bits. Every amount-out computation goes through here so rounding
/// is always down.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, QuoteError> {
    if denominator.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// `ceil(a * b / denominator)`, the rounding used whenever the user pays.
pub fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256, QuoteError> {
    if denominator.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    let denominator = widen(denominator);
    let mut quotient = product / denominator;
    if !(product % denominator).is_zero() {
        quotient += U512::from(1u64);
    }
    narrow(quotient)
}

pub fn checked_add(a: U256, b: U256) -> Result<U256, QuoteError> {
    a.checked_add(b).ok_or(QuoteError::ArithmeticOverflow)
}

pub fn checked_sub(a: U256, b: U256) -> Result<U256, QuoteError> {
    a.checked_sub(b).ok_or(QuoteError::ArithmeticOverflow)
}

pub fn checked_mul(a: U256, b: U256) -> Result<U256, QuoteError> {
    a.checked_mul(b).ok_or(QuoteError::ArithmeticOverflow)
}

/// Lossy conversion for display and numeraire valuation only. Never feed the result back into
/// amount math.
pub fn u256_to_f64(value: U256) -> f64 {
    value.as_limbs().iter().rev().fold(0f64, |acc, limb| acc * 18_446_744_073_709_551_616f64 + *limb as f64)
}
