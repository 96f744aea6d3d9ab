//! Deposit-share rebate tiers for the mint hook.
//!
//! A deposit's share of post-deposit pool TVL (in basis points) selects a
//! tier. Tiered deposits earn a liquidity rebate and pay a retention skim,
//! both expressed in basis points of the minted liquidity.

use serde::Serialize;

use crate::domain::fees::BPS_DENOMINATOR;
use crate::domain::math::mul_div;
use crate::error::EngineError;

/// Minimum share for tier 1 (5% of post-deposit TVL).
pub const TIER1_SHARE_BPS: u128 = 500;

/// Minimum share for tier 2 (20% of post-deposit TVL).
pub const TIER2_SHARE_BPS: u128 = 2_000;

/// A resolved rebate tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RebateTier {
    /// Tier ordinal (0 = no rebate).
    pub tier: u8,
    /// Liquidity rebate in basis points of the minted amount.
    pub rebate_bps: u128,
    /// Retention skim in basis points of the minted amount.
    pub retention_bps: u128,
}

/// Returns the tier for a deposit share of post-deposit TVL.
#[must_use]
pub const fn tier_for_share(share_bps: u128) -> RebateTier {
    if share_bps >= TIER2_SHARE_BPS {
        RebateTier {
            tier: 2,
            rebate_bps: 200,
            retention_bps: 100,
        }
    } else if share_bps >= TIER1_SHARE_BPS {
        RebateTier {
            tier: 1,
            rebate_bps: 100,
            retention_bps: 50,
        }
    } else {
        RebateTier {
            tier: 0,
            rebate_bps: 0,
            retention_bps: 0,
        }
    }
}

impl RebateTier {
    /// Rebate owed on `minted` liquidity units.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] on intermediate overflow.
    pub fn rebate_on(&self, minted: u128) -> Result<u128, EngineError> {
        mul_div(minted, self.rebate_bps, BPS_DENOMINATOR)
    }

    /// Retention skim taken from `minted` liquidity units.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] on intermediate overflow.
    pub fn retention_on(&self, minted: u128) -> Result<u128, EngineError> {
        mul_div(minted, self.retention_bps, BPS_DENOMINATOR)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for_share(0).tier, 0);
        assert_eq!(tier_for_share(499).tier, 0);
        assert_eq!(tier_for_share(500).tier, 1);
        assert_eq!(tier_for_share(1_999).tier, 1);
        assert_eq!(tier_for_share(2_000).tier, 2);
        assert_eq!(tier_for_share(10_000).tier, 2);
    }

    #[test]
    fn tier1_amounts() {
        let tier = tier_for_share(909); // 9.09% share
        assert_eq!(tier.tier, 1);
        assert_eq!(tier.rebate_on(10_000).ok(), Some(100));
        assert_eq!(tier.retention_on(10_000).ok(), Some(50));
    }
}
