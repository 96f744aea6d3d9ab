//! # orbit-router
//!
//! Multi-pool constant-product router with "orbit" path composition,
//! per-hop fee splitting, a dual-orbit oscillator, daily admission
//! control, and a REST/WebSocket gateway.
//!
//! A start pool resolves to a registered ordered sequence of pools (an
//! orbit); a routed swap applies the same input amount independently to
//! every hop and accumulates the outputs. Each hop charges a 1.2% fee on
//! top of the principal, splitting it into a treasury cut and a reserve
//! donation. Dual orbits alternate between an asset-in and a usdc-in
//! path after every successful swap.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── TreasuryGateway / MintRebateHook (engine/)
//!     ├── RouterEngine (engine/)
//!     ├── EventBus (domain/)
//!     │
//!     └── Pools + TokenLedger + Orbits (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ws;
