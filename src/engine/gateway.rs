//! Treasury/access gateway: the single-owner permission façade.
//!
//! The engine's configuration entry points accept the treasury and the
//! owner, resolved inside the engine's own state mutation. The gateway's
//! `*_via_treasury` passthroughs forward the caller unchanged; the
//! up-front owner check here only picks the error surface for strangers.
//! An ownership transfer that commits first therefore revokes an
//! in-flight passthrough at the engine gate. Ownership transfer is
//! single-phase and takes effect immediately.

use crate::domain::{AccountId, PoolId, TokenId};
use crate::engine::router::RouterEngine;
use crate::error::EngineError;

/// Owner-gated façade over the engine's treasury-gated operations.
#[derive(Debug, Clone)]
pub struct TreasuryGateway {
    engine: RouterEngine,
}

impl TreasuryGateway {
    /// Wraps `engine`.
    #[must_use]
    pub const fn new(engine: RouterEngine) -> Self {
        Self { engine }
    }

    /// Verifies `caller` is the owner. Advisory only: the engine re-checks
    /// authority inside the operation's own mutation.
    async fn require_owner(&self, caller: AccountId) -> Result<(), EngineError> {
        self.engine
            .read(|state| {
                if caller == state.owner() {
                    Ok(())
                } else {
                    Err(EngineError::NotOwner)
                }
            })
            .await
    }

    /// Transfers ownership to `new_owner`, effective immediately.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] unless `caller` is the current owner.
    pub async fn transfer_ownership(
        &self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> Result<(), EngineError> {
        self.engine
            .mutate(|state| {
                if caller != state.owner() {
                    return Err(EngineError::NotOwner);
                }
                state.set_owner(new_owner);
                Ok(())
            })
            .await?;
        tracing::info!(%new_owner, "ownership transferred");
        Ok(())
    }

    /// Points the engine at a new treasury account.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] unless `caller` is the owner.
    pub async fn set_treasury(
        &self,
        caller: AccountId,
        new_treasury: AccountId,
    ) -> Result<(), EngineError> {
        self.engine
            .mutate(|state| {
                if caller != state.owner() {
                    return Err(EngineError::NotOwner);
                }
                state.set_treasury(new_treasury);
                Ok(())
            })
            .await?;
        tracing::info!(%new_treasury, "treasury updated");
        Ok(())
    }

    /// Adds or removes an identity from the approved-supplicator set.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] unless `caller` is the owner.
    pub async fn set_approved_supplicator(
        &self,
        caller: AccountId,
        account: AccountId,
        approved: bool,
    ) -> Result<(), EngineError> {
        self.engine
            .mutate(|state| {
                if caller != state.owner() {
                    return Err(EngineError::NotOwner);
                }
                state.set_approved_supplicator(account, approved);
                Ok(())
            })
            .await?;
        tracing::info!(%account, approved, "supplicator approval changed");
        Ok(())
    }

    /// Owner passthrough for [`RouterEngine::create_pool`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller, plus the
    /// engine operation's own errors.
    pub async fn create_pool_via_treasury(
        &self,
        caller: AccountId,
        asset_token: TokenId,
        usdc_token: TokenId,
    ) -> Result<PoolId, EngineError> {
        self.require_owner(caller).await?;
        self.engine.create_pool(caller, asset_token, usdc_token).await
    }

    /// Owner passthrough for [`RouterEngine::bootstrap`]. Reserves are
    /// pulled from the treasury's balances.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller, plus the
    /// engine operation's own errors.
    pub async fn bootstrap_via_treasury(
        &self,
        caller: AccountId,
        pool_id: PoolId,
        amount_asset: u128,
        amount_usdc: u128,
        offset_bps: i32,
    ) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine
            .bootstrap(caller, pool_id, amount_asset, amount_usdc, offset_bps)
            .await
    }

    /// Owner passthrough for [`RouterEngine::set_orbit`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller, plus the
    /// engine operation's own errors.
    pub async fn set_orbit_via_treasury(
        &self,
        caller: AccountId,
        start_pool: PoolId,
        pools: Vec<PoolId>,
    ) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine.set_orbit(caller, start_pool, pools).await
    }

    /// Owner passthrough for [`RouterEngine::set_dual_orbit`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller, plus the
    /// engine operation's own errors.
    pub async fn set_dual_orbit_via_treasury(
        &self,
        caller: AccountId,
        start_pool: PoolId,
        neg: Vec<PoolId>,
        pos: Vec<PoolId>,
        start_with_neg: bool,
    ) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine
            .set_dual_orbit(caller, start_pool, neg, pos, start_with_neg)
            .await
    }

    /// Owner passthrough for [`RouterEngine::set_daily_event_cap`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller, plus the
    /// engine operation's own errors.
    pub async fn set_daily_event_cap_via_treasury(
        &self,
        caller: AccountId,
        cap: u64,
    ) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine.set_daily_event_cap(caller, cap).await
    }

    /// Owner passthrough for [`RouterEngine::pause`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller.
    pub async fn pause_via_treasury(&self, caller: AccountId) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine.pause(caller).await
    }

    /// Owner passthrough for [`RouterEngine::unpause`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller.
    pub async fn unpause_via_treasury(&self, caller: AccountId) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine.unpause(caller).await
    }

    /// Owner passthrough for [`RouterEngine::credit`].
    ///
    /// # Errors
    ///
    /// [`EngineError::NotOwner`] for a non-owner caller, plus the
    /// engine operation's own errors.
    pub async fn credit_via_treasury(
        &self,
        caller: AccountId,
        token: TokenId,
        account: AccountId,
        amount: u128,
    ) -> Result<(), EngineError> {
        self.require_owner(caller).await?;
        self.engine.credit(caller, token, account, amount).await
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::{EventBus, ManualClock};
    use std::sync::Arc;

    fn gateway() -> (TreasuryGateway, AccountId) {
        let owner = AccountId::new();
        let engine = RouterEngine::new(
            owner,
            AccountId::new(),
            AccountId::new(),
            100,
            EventBus::new(100),
            Arc::new(ManualClock::new(0)),
        );
        (TreasuryGateway::new(engine), owner)
    }

    #[tokio::test]
    async fn non_owner_is_rejected_everywhere() {
        let (gateway, _) = gateway();
        let stranger = AccountId::new();

        let result = gateway
            .create_pool_via_treasury(stranger, TokenId::new(), TokenId::new())
            .await;
        assert!(matches!(result, Err(EngineError::NotOwner)));
        let result = gateway.pause_via_treasury(stranger).await;
        assert!(matches!(result, Err(EngineError::NotOwner)));
        let result = gateway.transfer_ownership(stranger, stranger).await;
        assert!(matches!(result, Err(EngineError::NotOwner)));
        let result = gateway
            .set_approved_supplicator(stranger, stranger, true)
            .await;
        assert!(matches!(result, Err(EngineError::NotOwner)));
    }

    #[tokio::test]
    async fn owner_passthrough_reaches_the_engine() {
        let (gateway, owner) = gateway();
        let pool_id = gateway
            .create_pool_via_treasury(owner, TokenId::new(), TokenId::new())
            .await
            .unwrap();
        // The engine resolved the owner's authority itself.
        assert!(gateway.engine.get_pool(pool_id).await.is_ok());

        gateway.set_daily_event_cap_via_treasury(owner, 3).await.unwrap();
        gateway.pause_via_treasury(owner).await.unwrap();
        assert!(gateway.engine.is_paused().await);
        gateway.unpause_via_treasury(owner).await.unwrap();
        assert!(!gateway.engine.is_paused().await);
    }

    #[tokio::test]
    async fn ownership_transfer_is_immediate() {
        let (gateway, owner) = gateway();
        let successor = AccountId::new();
        gateway.transfer_ownership(owner, successor).await.unwrap();

        // The old owner lost its powers in the same breath.
        let result = gateway.pause_via_treasury(owner).await;
        assert!(matches!(result, Err(EngineError::NotOwner)));
        assert!(gateway.pause_via_treasury(successor).await.is_ok());
    }

    #[tokio::test]
    async fn revoked_owner_is_rejected_at_the_engine_gate() {
        let (gateway, owner) = gateway();
        let successor = AccountId::new();
        gateway.transfer_ownership(owner, successor).await.unwrap();

        // Even reaching the engine directly, bypassing the gateway's
        // advisory check, the old owner fails the in-mutation gate.
        let result = gateway.engine.pause(owner).await;
        assert!(matches!(result, Err(EngineError::NotTreasury)));
        assert!(gateway.engine.pause(successor).await.is_ok());
    }

    #[tokio::test]
    async fn supplicator_approval_round_trip() {
        let (gateway, owner) = gateway();
        let operator = AccountId::new();
        gateway
            .set_approved_supplicator(owner, operator, true)
            .await
            .unwrap();
        assert!(
            gateway
                .engine
                .read(|state| state.is_approved_supplicator(operator))
                .await
        );
        gateway
            .set_approved_supplicator(owner, operator, false)
            .await
            .unwrap();
        assert!(
            !gateway
                .engine
                .read(|state| state.is_approved_supplicator(operator))
                .await
        );
    }
}
