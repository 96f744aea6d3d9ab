//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams router events in real time.
//! Clients subscribe to specific pools or to everything with the `"*"`
//! wildcard; router-level events with no pool attached only reach
//! wildcard subscribers.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
