//! Mint-with-rebate hook.
//!
//! Wraps the plain pool mint with value-equality validation and the
//! deposit-share rebate tiers: the deposit's share of post-deposit pool
//! TVL picks a tier, and the tier's rebate and retention are skimmed off
//! the freshly minted liquidity units. The rebate accrues to the rebate
//! vault, the retention to the treasury; `total_liquidity` is unchanged
//! by the skim.

use chrono::Utc;

use crate::domain::fees::BPS_DENOMINATOR;
use crate::domain::math::mul_div;
use crate::domain::rebate::{RebateTier, tier_for_share};
use crate::domain::{AccountId, LiquidityChangeType, PoolId, RouterEvent};
use crate::engine::router::RouterEngine;
use crate::error::EngineError;

/// Tolerance for value-equality of the two desired deposit amounts, in
/// basis points of the larger amount.
pub const VALUE_TOLERANCE_BPS: u128 = 100;

/// Result of a successful rebate-qualified mint.
#[derive(Debug, Clone, Copy)]
pub struct MintOutcome {
    /// Liquidity units minted before the skim.
    pub minted: u128,
    /// Units the depositor keeps after rebate and retention.
    pub net_minted: u128,
    /// Deposit share of post-deposit TVL in basis points.
    pub share_bps: u128,
    /// The tier the deposit qualified for.
    pub tier: RebateTier,
    /// Units moved to the rebate vault.
    pub rebate: u128,
    /// Units moved to the treasury.
    pub retention: u128,
}

/// Tiered mint hook over the engine.
#[derive(Debug, Clone)]
pub struct MintRebateHook {
    engine: RouterEngine,
}

impl MintRebateHook {
    /// Wraps `engine`.
    #[must_use]
    pub const fn new(engine: RouterEngine) -> Self {
        Self { engine }
    }

    /// Deposits both amounts from `depositor`, mints liquidity, and
    /// applies the tier skim.
    ///
    /// # Errors
    ///
    /// [`EngineError::ZeroAmount`] when both desired amounts are zero,
    /// [`EngineError::ValueImbalance`] when they differ by more than 1%
    /// of the larger one, plus everything the underlying pool mint
    /// returns.
    pub async fn mint_with_rebate(
        &self,
        depositor: AccountId,
        pool_id: PoolId,
        amount_asset: u128,
        amount_usdc: u128,
    ) -> Result<MintOutcome, EngineError> {
        if amount_asset == 0 && amount_usdc == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let larger = amount_asset.max(amount_usdc);
        let diff = larger - amount_asset.min(amount_usdc);
        if diff > mul_div(larger, VALUE_TOLERANCE_BPS, BPS_DENOMINATOR)? {
            return Err(EngineError::ValueImbalance {
                amount_asset,
                amount_usdc,
            });
        }

        let (outcome, new_total) = self
            .engine
            .mutate(|state| {
                let pool = state.pool(pool_id)?;
                let tvl = pool
                    .reserve_asset()
                    .checked_add(pool.reserve_usdc())
                    .ok_or(EngineError::AmountOverflow)?;
                let deposit_value = amount_asset
                    .checked_add(amount_usdc)
                    .ok_or(EngineError::AmountOverflow)?;
                let post_tvl = tvl
                    .checked_add(deposit_value)
                    .ok_or(EngineError::AmountOverflow)?;
                let share_bps = mul_div(deposit_value, BPS_DENOMINATOR, post_tvl)?;
                let tier = tier_for_share(share_bps);

                let (pool, ledger) = state.pool_and_ledger_mut(pool_id)?;
                let minted = pool.mint(ledger, depositor, depositor, amount_asset, amount_usdc)?;
                let rebate = tier.rebate_on(minted)?;
                let retention = tier.retention_on(minted)?;
                let new_total = pool.total_liquidity();

                let rebate_vault = state.rebate_vault();
                let treasury = state.treasury();
                let (pool, _) = state.pool_and_ledger_mut(pool_id)?;
                pool.transfer_liquidity(depositor, rebate_vault, rebate)?;
                pool.transfer_liquidity(depositor, treasury, retention)?;

                let net_minted = minted - rebate - retention;
                Ok((
                    MintOutcome {
                        minted,
                        net_minted,
                        share_bps,
                        tier,
                        rebate,
                        retention,
                    },
                    new_total,
                ))
            })
            .await?;

        if outcome.tier.tier > 0 {
            let _ = self.engine.event_bus().publish(RouterEvent::McvQualified {
                pool_id,
                depositor,
                tier: outcome.tier.tier,
                minted: outcome.minted.to_string(),
                rebate: outcome.rebate.to_string(),
                retention: outcome.retention.to_string(),
                timestamp: Utc::now(),
            });
        }
        let _ = self.engine.event_bus().publish(RouterEvent::LiquidityChanged {
            pool_id,
            change_type: LiquidityChangeType::Add,
            amount_asset: amount_asset.to_string(),
            amount_usdc: amount_usdc.to_string(),
            new_total_liquidity: new_total.to_string(),
            timestamp: Utc::now(),
        });
        tracing::info!(
            %pool_id,
            %depositor,
            minted = outcome.minted,
            tier = outcome.tier.tier,
            share_bps = outcome.share_bps,
            "rebate mint executed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::{EventBus, ManualClock, TokenId};
    use std::sync::Arc;

    struct Harness {
        hook: MintRebateHook,
        engine: RouterEngine,
        treasury: AccountId,
        rebate_vault: AccountId,
        depositor: AccountId,
        pool_id: PoolId,
    }

    /// One 1_000_000/1_000_000 pool (TVL 2_000_000) and a funded depositor.
    async fn harness() -> Harness {
        let treasury = AccountId::new();
        let rebate_vault = AccountId::new();
        let engine = RouterEngine::new(
            AccountId::new(),
            treasury,
            rebate_vault,
            100,
            EventBus::new(100),
            Arc::new(ManualClock::new(0)),
        );
        let asset = TokenId::new();
        let usdc = TokenId::new();
        engine
            .credit(treasury, asset, treasury, 10_000_000)
            .await
            .unwrap();
        engine
            .credit(treasury, usdc, treasury, 10_000_000)
            .await
            .unwrap();
        let pool_id = engine.create_pool(treasury, asset, usdc).await.unwrap();
        engine
            .bootstrap(treasury, pool_id, 1_000_000, 1_000_000, 0)
            .await
            .unwrap();

        let depositor = AccountId::new();
        engine
            .credit(treasury, asset, depositor, 2_000_000)
            .await
            .unwrap();
        engine
            .credit(treasury, usdc, depositor, 2_000_000)
            .await
            .unwrap();

        Harness {
            hook: MintRebateHook::new(engine.clone()),
            engine,
            treasury,
            rebate_vault,
            depositor,
            pool_id,
        }
    }

    #[tokio::test]
    async fn nine_percent_share_lands_in_tier_one() {
        let h = harness().await;
        // 200_000 into post-deposit TVL 2_200_000 = 909 bps.
        let outcome = h
            .hook
            .mint_with_rebate(h.depositor, h.pool_id, 100_000, 100_000)
            .await
            .unwrap();

        assert_eq!(outcome.share_bps, 909);
        assert_eq!(outcome.tier.tier, 1);
        assert_eq!(outcome.minted, 200_000);
        assert_eq!(outcome.rebate, 2_000); // 1.0%
        assert_eq!(outcome.retention, 1_000); // 0.5%
        assert_eq!(outcome.net_minted, 197_000);

        assert_eq!(
            h.engine
                .liquidity_of(h.pool_id, h.depositor)
                .await
                .unwrap(),
            197_000
        );
        assert_eq!(
            h.engine
                .liquidity_of(h.pool_id, h.rebate_vault)
                .await
                .unwrap(),
            2_000
        );
        // 2_000_000 seeded at bootstrap plus the 1_000 retention skim.
        assert_eq!(
            h.engine.liquidity_of(h.pool_id, h.treasury).await.unwrap(),
            2_001_000
        );
        // The skim reassigns units; it never changes the total.
        let snapshot = h.engine.get_pool(h.pool_id).await.unwrap();
        assert_eq!(snapshot.total_liquidity, 2_200_000);
    }

    #[tokio::test]
    async fn small_share_mints_without_skim() {
        let h = harness().await;
        // 20_000 into post-deposit TVL 2_020_000 = 99 bps, below tier 1.
        let outcome = h
            .hook
            .mint_with_rebate(h.depositor, h.pool_id, 10_000, 10_000)
            .await
            .unwrap();
        assert_eq!(outcome.tier.tier, 0);
        assert_eq!(outcome.rebate, 0);
        assert_eq!(outcome.retention, 0);
        assert_eq!(outcome.net_minted, outcome.minted);
    }

    #[tokio::test]
    async fn large_share_reaches_tier_two() {
        let h = harness().await;
        // 2_000_000 into post-deposit TVL 4_000_000 = 5000 bps.
        let outcome = h
            .hook
            .mint_with_rebate(h.depositor, h.pool_id, 1_000_000, 1_000_000)
            .await
            .unwrap();
        assert_eq!(outcome.tier.tier, 2);
        assert_eq!(outcome.rebate, outcome.minted * 200 / 10_000);
        assert_eq!(outcome.retention, outcome.minted * 100 / 10_000);
    }

    #[tokio::test]
    async fn unbalanced_deposit_is_rejected() {
        let h = harness().await;
        // 2% apart, above the 1% tolerance.
        let result = h
            .hook
            .mint_with_rebate(h.depositor, h.pool_id, 100_000, 98_000)
            .await;
        assert!(matches!(result, Err(EngineError::ValueImbalance { .. })));

        // Exactly at tolerance passes.
        assert!(
            h.hook
                .mint_with_rebate(h.depositor, h.pool_id, 100_000, 99_000)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn zero_deposit_is_rejected() {
        let h = harness().await;
        let result = h.hook.mint_with_rebate(h.depositor, h.pool_id, 0, 0).await;
        assert!(matches!(result, Err(EngineError::ZeroAmount)));
    }

    #[tokio::test]
    async fn dust_deposit_cannot_drain_the_pool() {
        let h = harness().await;
        let outcome = h
            .hook
            .mint_with_rebate(h.depositor, h.pool_id, 1, 1)
            .await
            .unwrap();
        assert_eq!(outcome.minted, 2);
        assert_eq!(outcome.tier.tier, 0);

        // Burning the dust share gets back 1+1, not the seeded reserves.
        let (asset_out, usdc_out) = h.engine.burn(h.depositor, h.pool_id, 2).await.unwrap();
        assert_eq!(asset_out, 1);
        assert_eq!(usdc_out, 1);
        assert_eq!(
            h.engine.liquidity_of(h.pool_id, h.treasury).await.unwrap(),
            2_000_000
        );
        let snapshot = h.engine.get_pool(h.pool_id).await.unwrap();
        assert_eq!(snapshot.total_liquidity, 2_000_000);
    }

    #[tokio::test]
    async fn qualified_mint_emits_mcv_event() {
        let h = harness().await;
        let mut rx = h.engine.event_bus().subscribe();
        h.hook
            .mint_with_rebate(h.depositor, h.pool_id, 100_000, 100_000)
            .await
            .unwrap();

        let mut types = Vec::new();
        while let Ok(event) = rx.try_recv() {
            types.push(event.event_type_str());
        }
        assert_eq!(types, vec!["mcv_qualified", "liquidity_changed"]);
    }
}
