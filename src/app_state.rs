//! Shared application state injected into all Axum handlers.

use crate::domain::EventBus;
use crate::engine::{MintRebateHook, RouterEngine, TreasuryGateway};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The router engine for swaps, quotes, and reads.
    pub engine: RouterEngine,
    /// Owner-gated façade over the engine's configuration entry points.
    pub gateway: TreasuryGateway,
    /// Tiered mint hook for liquidity deposits.
    pub mint_hook: MintRebateHook,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
