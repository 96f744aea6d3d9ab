//! Domain events reflecting router and pool state mutations.
//!
//! Every successful state change emits a [`RouterEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers;
//! external monitoring consumes them, the core never reads them back.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountId, OrbitSide, PoolId};

/// Whether a liquidity change added or removed units.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityChangeType {
    /// Liquidity was minted.
    Add,
    /// Liquidity was burned.
    Remove,
}

/// Domain event emitted after every state mutation.
///
/// All `u128` amounts are stored as `String` to preserve precision when
/// serialized to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RouterEvent {
    /// Emitted when a new pool is created by the factory operation.
    PoolCreated {
        /// Pool identifier.
        pool_id: PoolId,
        /// Asset-side token.
        asset_token: String,
        /// Usdc-side token.
        usdc_token: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted once per executed hop of a routed or supplicated swap.
    HopExecuted {
        /// Pool the hop ran against.
        pool_id: PoolId,
        /// Trade direction of the hop.
        asset_to_usdc: bool,
        /// Input-side token.
        token_in: String,
        /// Output-side token.
        token_out: String,
        /// Hop input amount (string-encoded u128).
        amount_in: String,
        /// Hop output amount (string-encoded u128).
        amount_out: String,
        /// Execution timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted once per hop with the resolved fee split.
    FeeTaken {
        /// Pool the fee was charged for.
        pool_id: PoolId,
        /// Payer the fee was pulled from.
        payer: AccountId,
        /// Total fee (string-encoded u128).
        total_fee: String,
        /// Treasury share (string-encoded u128).
        treasury_cut: String,
        /// Amount donated into the pool reserve (string-encoded u128).
        pool_donation: String,
        /// Execution timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a dual orbit flips its active side.
    OrbitFlipped {
        /// Start pool the orbit is keyed by.
        start_pool: PoolId,
        /// Side that is now active.
        now_active: OrbitSide,
        /// Flip timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the treasury changes the daily event cap.
    DailyEventCapUpdated {
        /// New cap value.
        cap: u64,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the admission window crosses a day boundary.
    DailyEventWindowRolled {
        /// Unix day index of the fresh window.
        day_index: u64,
        /// Roll timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a mint-with-rebate deposit lands in a rebate tier.
    McvQualified {
        /// Pool the deposit was made into.
        pool_id: PoolId,
        /// Depositor identity.
        depositor: AccountId,
        /// Tier ordinal the deposit qualified for.
        tier: u8,
        /// Liquidity minted before the skim (string-encoded u128).
        minted: String,
        /// Rebate in liquidity units (string-encoded u128).
        rebate: String,
        /// Retention skim in liquidity units (string-encoded u128).
        retention: String,
        /// Qualification timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after liquidity is minted or burned.
    LiquidityChanged {
        /// Pool identifier.
        pool_id: PoolId,
        /// Whether liquidity was added or removed.
        change_type: LiquidityChangeType,
        /// Asset-side amount involved (string-encoded u128).
        amount_asset: String,
        /// Usdc-side amount involved (string-encoded u128).
        amount_usdc: String,
        /// New total liquidity after the change (string-encoded u128).
        new_total_liquidity: String,
        /// Timestamp of the change.
        timestamp: DateTime<Utc>,
    },
}

impl RouterEvent {
    /// Returns the pool ID this event is scoped to, if any.
    ///
    /// Router-wide events (cap updates, window rolls) carry no pool and
    /// are only delivered to wildcard subscribers.
    #[must_use]
    pub const fn pool_id(&self) -> Option<PoolId> {
        match self {
            Self::PoolCreated { pool_id, .. }
            | Self::HopExecuted { pool_id, .. }
            | Self::FeeTaken { pool_id, .. }
            | Self::McvQualified { pool_id, .. }
            | Self::LiquidityChanged { pool_id, .. } => Some(*pool_id),
            Self::OrbitFlipped { start_pool, .. } => Some(*start_pool),
            Self::DailyEventCapUpdated { .. } | Self::DailyEventWindowRolled { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PoolCreated { .. } => "pool_created",
            Self::HopExecuted { .. } => "hop_executed",
            Self::FeeTaken { .. } => "fee_taken",
            Self::OrbitFlipped { .. } => "orbit_flipped",
            Self::DailyEventCapUpdated { .. } => "daily_event_cap_updated",
            Self::DailyEventWindowRolled { .. } => "daily_event_window_rolled",
            Self::McvQualified { .. } => "mcv_qualified",
            Self::LiquidityChanged { .. } => "liquidity_changed",
        }
    }
}
