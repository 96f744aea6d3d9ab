//! Domain layer: core types, pool math, orbit registry, and event system.
//!
//! This module contains the engine's domain model: pool, account, and
//! token identity; the in-process token ledger; constant-product pool
//! state with the price-offset multiplier; orbit entries and the flip
//! state machine; the per-hop fee schedule; the daily admission window;
//! rebate tiers; and the broadcast event system.

pub mod account_id;
pub mod clock;
pub mod event;
pub mod event_bus;
pub mod fees;
pub mod ledger;
pub mod math;
pub mod orbit;
pub mod pool;
pub mod pool_id;
pub mod rebate;
pub mod token;
pub mod window;

pub use account_id::AccountId;
pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{LiquidityChangeType, RouterEvent};
pub use event_bus::EventBus;
pub use ledger::TokenLedger;
pub use orbit::{OrbitEntry, OrbitSide};
pub use pool::Pool;
pub use pool_id::PoolId;
pub use rebate::RebateTier;
pub use token::{TokenId, TokenPair};
pub use window::DailyWindow;
