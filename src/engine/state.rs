//! Aggregate mutable state of the router engine.
//!
//! Everything a transaction can touch lives in one [`EngineState`] value:
//! pools, the token ledger, the orbit registry, the daily admission
//! window, and the access-control sets. The engine keeps it behind a
//! single `RwLock`; multi-step operations clone the state, mutate the
//! clone, and swap it back in only on full success, so a failed
//! operation can never leave partial mutations behind.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    AccountId, DailyWindow, OrbitEntry, Pool, PoolId, TokenId, TokenLedger, TokenPair,
};
use crate::error::EngineError;

/// Read-only snapshot of a pool for DTOs and monitoring.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSnapshot {
    /// Pool identifier.
    pub pool_id: PoolId,
    /// Asset-side token.
    pub asset_token: TokenId,
    /// Usdc-side token.
    pub usdc_token: TokenId,
    /// Custody account holding the pool's balances.
    pub custody: AccountId,
    /// Asset-side reserve.
    pub reserve_asset: u128,
    /// Usdc-side reserve.
    pub reserve_usdc: u128,
    /// Configured price offset in basis points.
    pub target_offset_bps: i32,
    /// Whether the pool has been bootstrapped.
    pub initialized: bool,
    /// Total liquidity units outstanding.
    pub total_liquidity: u128,
    /// Number of swaps executed.
    pub swap_count: u64,
    /// Cumulative swap input volume.
    pub total_volume: u128,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub last_modified_at: DateTime<Utc>,
}

impl From<&Pool> for PoolSnapshot {
    fn from(pool: &Pool) -> Self {
        Self {
            pool_id: pool.pool_id(),
            asset_token: pool.pair().asset,
            usdc_token: pool.pair().usdc,
            custody: pool.custody(),
            reserve_asset: pool.reserve_asset(),
            reserve_usdc: pool.reserve_usdc(),
            target_offset_bps: pool.target_offset_bps(),
            initialized: pool.initialized(),
            total_liquidity: pool.total_liquidity(),
            swap_count: pool.swap_count(),
            total_volume: pool.total_volume(),
            created_at: pool.created_at(),
            last_modified_at: pool.last_modified_at(),
        }
    }
}

/// The engine's entire mutable state.
#[derive(Debug, Clone)]
pub struct EngineState {
    pools: HashMap<PoolId, Pool>,
    ledger: TokenLedger,
    orbits: HashMap<PoolId, OrbitEntry>,
    paused: bool,
    daily_event_cap: u64,
    window: DailyWindow,
    owner: AccountId,
    treasury: AccountId,
    rebate_vault: AccountId,
    approved_supplicators: HashSet<AccountId>,
}

impl EngineState {
    /// Creates a fresh state with no pools and an empty ledger.
    #[must_use]
    pub fn new(
        owner: AccountId,
        treasury: AccountId,
        rebate_vault: AccountId,
        daily_event_cap: u64,
        now: u64,
    ) -> Self {
        Self {
            pools: HashMap::new(),
            ledger: TokenLedger::new(),
            orbits: HashMap::new(),
            paused: false,
            daily_event_cap,
            window: DailyWindow::new(now),
            owner,
            treasury,
            rebate_vault,
            approved_supplicators: HashSet::new(),
        }
    }

    /// The current owner identity.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// The configured treasury account.
    #[must_use]
    pub const fn treasury(&self) -> AccountId {
        self.treasury
    }

    /// The rebate-vault account liquidity rebates accrue to.
    #[must_use]
    pub const fn rebate_vault(&self) -> AccountId {
        self.rebate_vault
    }

    /// Whether swap execution is halted.
    #[must_use]
    pub const fn paused(&self) -> bool {
        self.paused
    }

    /// The configured daily event cap.
    #[must_use]
    pub const fn daily_event_cap(&self) -> u64 {
        self.daily_event_cap
    }

    /// The current admission window.
    #[must_use]
    pub const fn window(&self) -> DailyWindow {
        self.window
    }

    /// Whether `account` may call the single-pool supplicate entry.
    #[must_use]
    pub fn is_approved_supplicator(&self, account: AccountId) -> bool {
        self.approved_supplicators.contains(&account)
    }

    /// Number of pools created so far.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Immutable access to a pool.
    ///
    /// # Errors
    ///
    /// [`EngineError::PoolNotFound`] for an unknown id.
    pub fn pool(&self, pool_id: PoolId) -> Result<&Pool, EngineError> {
        self.pools
            .get(&pool_id)
            .ok_or(EngineError::PoolNotFound(pool_id))
    }

    /// Mutable access to a pool together with the ledger, for operations
    /// that must move tokens and reserves in lockstep.
    ///
    /// # Errors
    ///
    /// [`EngineError::PoolNotFound`] for an unknown id.
    pub fn pool_and_ledger_mut(
        &mut self,
        pool_id: PoolId,
    ) -> Result<(&mut Pool, &mut TokenLedger), EngineError> {
        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(EngineError::PoolNotFound(pool_id))?;
        Ok((pool, &mut self.ledger))
    }

    /// Immutable access to the token ledger.
    #[must_use]
    pub const fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// Mutable access to the token ledger.
    pub const fn ledger_mut(&mut self) -> &mut TokenLedger {
        &mut self.ledger
    }

    /// The orbit entry registered for `start_pool`, if any.
    #[must_use]
    pub fn orbit(&self, start_pool: PoolId) -> Option<&OrbitEntry> {
        self.orbits.get(&start_pool)
    }

    /// Mutable orbit entry for `start_pool`, if any.
    pub fn orbit_mut(&mut self, start_pool: PoolId) -> Option<&mut OrbitEntry> {
        self.orbits.get_mut(&start_pool)
    }

    /// Snapshots of all pools, ordered by creation time.
    #[must_use]
    pub fn pool_snapshots(&self) -> Vec<PoolSnapshot> {
        let mut snapshots: Vec<PoolSnapshot> = self.pools.values().map(Into::into).collect();
        snapshots.sort_by_key(|s| s.created_at);
        snapshots
    }

    /// Inserts a new pool and returns its id.
    pub fn insert_pool(&mut self, pair: TokenPair) -> PoolId {
        let pool = Pool::new(pair);
        let pool_id = pool.pool_id();
        self.pools.insert(pool_id, pool);
        pool_id
    }

    /// Registers an orbit entry for `start_pool`, replacing any previous
    /// registration.
    ///
    /// Validates that every referenced pool exists and that all pools in
    /// the entry share one token pair.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRequest`] for an empty path.
    /// - [`EngineError::PoolNotFound`] for an unknown pool.
    /// - [`EngineError::TokenMismatch`] when pairs disagree.
    pub fn register_orbit(
        &mut self,
        start_pool: PoolId,
        entry: OrbitEntry,
    ) -> Result<(), EngineError> {
        let paths: Vec<&[PoolId]> = match &entry {
            OrbitEntry::Legacy(path) => vec![path.as_slice()],
            OrbitEntry::Dual { neg, pos, .. } => vec![neg.as_slice(), pos.as_slice()],
        };
        let mut reference: Option<(PoolId, TokenPair)> = None;
        for path in paths {
            if path.is_empty() {
                return Err(EngineError::InvalidRequest(
                    "orbit path must not be empty".to_string(),
                ));
            }
            for pool_id in path {
                let pair = self.pool(*pool_id)?.pair();
                match reference {
                    None => reference = Some((*pool_id, pair)),
                    Some((ref_id, ref_pair)) if ref_pair != pair => {
                        return Err(EngineError::TokenMismatch {
                            pool_a: ref_id,
                            pool_b: *pool_id,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        self.orbits.insert(start_pool, entry);
        Ok(())
    }

    /// Sets the pause switch.
    pub const fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Sets the daily event cap.
    pub const fn set_daily_event_cap(&mut self, cap: u64) {
        self.daily_event_cap = cap;
    }

    /// Mutable access to the admission window.
    pub const fn window_mut(&mut self) -> &mut DailyWindow {
        &mut self.window
    }

    /// Replaces the owner identity.
    pub const fn set_owner(&mut self, new_owner: AccountId) {
        self.owner = new_owner;
    }

    /// Replaces the treasury account.
    pub const fn set_treasury(&mut self, new_treasury: AccountId) {
        self.treasury = new_treasury;
    }

    /// Adds or removes `account` from the approved-supplicator set.
    pub fn set_approved_supplicator(&mut self, account: AccountId, approved: bool) {
        if approved {
            self.approved_supplicators.insert(account);
        } else {
            self.approved_supplicators.remove(&account);
        }
    }
}
