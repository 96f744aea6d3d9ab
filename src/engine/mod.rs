//! Engine layer: state aggregate, router, access gateway, and mint hook.
//!
//! [`RouterEngine`] owns all mutable state and executes every operation
//! as an atomic, serialized transaction. [`TreasuryGateway`] is the
//! owner-gated façade over its treasury-gated configuration entry
//! points, and [`MintRebateHook`] wraps pool mints with the rebate tier
//! logic.

pub mod gateway;
pub mod mint_hook;
pub mod router;
pub mod state;

pub use gateway::TreasuryGateway;
pub use mint_hook::{MintOutcome, MintRebateHook};
pub use router::{
    ActiveOrbit, HopRecord, RouterEngine, SupplicateRequest, SwapOutcome, SwapRequest,
};
pub use state::{EngineState, PoolSnapshot};
