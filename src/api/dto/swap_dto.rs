//! Orbit swap, supplicate, and active-orbit DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PoolId;

/// Request body for `POST /swap`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrbitSwapRequest {
    /// Start pool whose registered orbit is walked.
    pub start_pool: uuid::Uuid,
    /// Requested trade direction. Authoritative for a legacy orbit,
    /// ignored for a dual orbit.
    pub asset_to_usdc: bool,
    /// Input amount applied to every hop (string-encoded u128).
    pub amount_in: String,
    /// Minimum acceptable total output across all hops (string-encoded
    /// u128). Defaults to `"0"`.
    #[serde(default)]
    pub min_total_amount_out: Option<String>,
    /// Account funding principal and fees.
    pub payer: uuid::Uuid,
    /// Account receiving all hop outputs.
    pub to: uuid::Uuid,
}

/// One executed hop in a swap response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HopDto {
    /// Pool the hop ran against.
    pub pool_id: PoolId,
    /// Trade direction of the hop.
    pub asset_to_usdc: bool,
    /// Hop input amount (string-encoded).
    pub amount_in: String,
    /// Hop output amount (string-encoded).
    pub amount_out: String,
    /// Total fee pulled for this hop (string-encoded).
    pub total_fee: String,
    /// Treasury share of the fee (string-encoded).
    pub treasury_cut: String,
    /// Amount donated into the pool reserve (string-encoded).
    pub pool_donation: String,
}

/// Response body for `POST /swap` and `POST /supplicate`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SwapResponse {
    /// Sum of all hop outputs (string-encoded).
    pub total_amount_out: String,
    /// The executed hops, in order.
    pub hops: Vec<HopDto>,
    /// New active side (`"neg"`/`"pos"`) when the swap flipped a dual
    /// orbit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flipped_to: Option<String>,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}

/// Request body for `POST /supplicate`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplicateRequestDto {
    /// Calling identity; must be an approved supplicator.
    pub caller: uuid::Uuid,
    /// Pool to swap against.
    pub pool: uuid::Uuid,
    /// Trade direction.
    pub asset_to_usdc: bool,
    /// Input amount (string-encoded u128).
    pub amount_in: String,
    /// Minimum acceptable output (string-encoded u128). Defaults to `"0"`.
    #[serde(default)]
    pub min_amount_out: Option<String>,
    /// Account funding principal and fees.
    pub payer: uuid::Uuid,
    /// Account receiving the output.
    pub to: uuid::Uuid,
}

/// Response body for `GET /orbits/:start_pool`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveOrbitResponse {
    /// Start pool the orbit is keyed by.
    pub start_pool: PoolId,
    /// Ordered pools the next swap will walk.
    pub pools: Vec<PoolId>,
    /// `true` if the NEG side is active, `false` for POS, absent for a
    /// legacy orbit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub using_neg: Option<bool>,
}
