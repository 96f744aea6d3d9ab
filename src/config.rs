//! Router configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;

use crate::domain::AccountId;

/// Top-level router configuration.
///
/// Loaded once at startup via [`RouterConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Initial daily event cap for the admission window.
    pub daily_event_cap: u64,

    /// Bootstrap owner identity. Random when unset.
    pub owner: AccountId,

    /// Bootstrap treasury identity. Random when unset.
    pub treasury: AccountId,

    /// Rebate-vault identity. Random when unset.
    pub rebate_vault: AccountId,
}

impl RouterConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 10_000);
        let daily_event_cap = parse_env("DAILY_EVENT_CAP", 100);

        let owner = parse_env_account("OWNER_ID");
        let treasury = parse_env_account("TREASURY_ID");
        let rebate_vault = parse_env_account("REBATE_VAULT_ID");

        Ok(Self {
            listen_addr,
            event_bus_capacity,
            daily_event_cap,
            owner,
            treasury,
            rebate_vault,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as an account UUID, generating a fresh
/// identity when missing or invalid.
fn parse_env_account(key: &str) -> AccountId {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<uuid::Uuid>().ok())
        .map_or_else(AccountId::new, AccountId::from_uuid)
}
