//! Integer amount arithmetic shared by pricing and fee code.
//!
//! All amounts are `u128` raw token units and every division floors.
//! The order of operations in callers (constant-product division first,
//! offset scaling second, each truncating independently) is load-bearing
//! for exact-match behavior and must not be rearranged.

use crate::error::EngineError;

/// Computes `a * b / denominator` with floor division.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] if `a * b` exceeds `u128`,
/// and [`EngineError::InvalidAmount`] on a zero denominator.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, EngineError> {
    if denominator == 0 {
        return Err(EngineError::InvalidAmount("division by zero".to_string()));
    }
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(EngineError::AmountOverflow)
}
