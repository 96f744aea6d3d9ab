//! Per-hop fee schedule and split.
//!
//! Every hop charges a flat 1.2% fee on its input amount, pulled from the
//! payer on top of the hop principal. The fee splits into a 0.2% treasury
//! cut and a 1.0% pool donation; the donation lands on the input-side
//! reserve of the hop's pool before the hop quote is taken.

use crate::domain::math::mul_div;
use crate::error::EngineError;

/// Basis-point denominator used throughout the engine.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Total per-hop fee in basis points (1.2%).
pub const FEE_BPS: u128 = 120;

/// Treasury share of the fee in basis points (0.2%).
pub const TREASURY_CUT_BPS: u128 = 20;

/// Pool donation share of the fee in basis points (1.0%).
pub const POOLS_DONATE_BPS: u128 = 100;

/// A per-hop fee resolved against a concrete input amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Total fee pulled from the payer on top of the principal.
    pub total: u128,
    /// Portion forwarded to the treasury account.
    pub treasury_cut: u128,
    /// Portion donated to the hop pool's input-side reserve.
    pub pool_donation: u128,
}

impl FeeSplit {
    /// Resolves the fee schedule against `amount_in`.
    ///
    /// The treasury cut and pool donation are floored independently off the
    /// input amount; the total is their sum, so no dust is ever charged
    /// beyond the two floored parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] on intermediate overflow.
    pub fn on_input(amount_in: u128) -> Result<Self, EngineError> {
        let treasury_cut = mul_div(amount_in, TREASURY_CUT_BPS, BPS_DENOMINATOR)?;
        let pool_donation = mul_div(amount_in, POOLS_DONATE_BPS, BPS_DENOMINATOR)?;
        let total = treasury_cut
            .checked_add(pool_donation)
            .ok_or(EngineError::AmountOverflow)?;
        Ok(Self {
            total,
            treasury_cut,
            pool_donation,
        })
    }
}
