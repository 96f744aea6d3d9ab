//! Owner-gated admin DTOs: orbits, cap, pause, access, and credit.

use serde::Deserialize;

/// Request body for `POST /admin/orbit`.
#[derive(Debug, Deserialize)]
pub struct SetOrbitRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// Start pool the orbit is keyed by.
    pub start_pool: uuid::Uuid,
    /// Ordered hop pools. May repeat the same pool.
    pub pools: Vec<uuid::Uuid>,
}

/// Request body for `POST /admin/dual-orbit`.
#[derive(Debug, Deserialize)]
pub struct SetDualOrbitRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// Start pool the orbit is keyed by.
    pub start_pool: uuid::Uuid,
    /// Path used while the NEG (asset-in) side is active.
    pub neg: Vec<uuid::Uuid>,
    /// Path used while the POS (usdc-in) side is active.
    pub pos: Vec<uuid::Uuid>,
    /// Whether the NEG side starts active. Defaults to `true`.
    #[serde(default = "default_start_with_neg")]
    pub start_with_neg: bool,
}

fn default_start_with_neg() -> bool {
    true
}

/// Request body for `POST /admin/cap`.
#[derive(Debug, Deserialize)]
pub struct SetCapRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// New daily event cap.
    pub cap: u64,
}

/// Request body for `POST /admin/pause` and `POST /admin/unpause`.
#[derive(Debug, Deserialize)]
pub struct PauseRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
}

/// Request body for `POST /admin/supplicators`.
#[derive(Debug, Deserialize)]
pub struct SetSupplicatorRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// Identity being approved or revoked.
    pub account: uuid::Uuid,
    /// `true` to approve, `false` to revoke.
    pub approved: bool,
}

/// Request body for `POST /admin/ownership`.
#[derive(Debug, Deserialize)]
pub struct TransferOwnershipRequest {
    /// Calling identity; must be the current owner.
    pub caller: uuid::Uuid,
    /// The new owner. Takes effect immediately.
    pub new_owner: uuid::Uuid,
}

/// Request body for `POST /admin/treasury`.
#[derive(Debug, Deserialize)]
pub struct SetTreasuryRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// The new treasury account.
    pub new_treasury: uuid::Uuid,
}

/// Request body for `POST /admin/credit`.
#[derive(Debug, Deserialize)]
pub struct CreditRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// Token to credit.
    pub token: uuid::Uuid,
    /// Account receiving the balance.
    pub account: uuid::Uuid,
    /// Amount to credit (string-encoded u128).
    pub amount: String,
}
