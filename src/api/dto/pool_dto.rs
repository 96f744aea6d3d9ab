//! Pool creation, bootstrap, and quote DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PoolId;

/// Request body for `POST /pools`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePoolRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// Asset-side token id.
    pub asset_token: uuid::Uuid,
    /// Usdc-side token id.
    pub usdc_token: uuid::Uuid,
}

/// Response body for `POST /pools`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePoolResponse {
    /// Identifier of the new pool.
    pub pool_id: PoolId,
    /// Asset-side token id.
    pub asset_token: uuid::Uuid,
    /// Usdc-side token id.
    pub usdc_token: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status (always `"uninitialized"` at creation).
    pub status: String,
}

/// One pool in the `GET /pools` listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolSummaryDto {
    /// Pool identifier.
    pub pool_id: PoolId,
    /// Asset-side reserve (string-encoded u128).
    pub reserve_asset: String,
    /// Usdc-side reserve (string-encoded u128).
    pub reserve_usdc: String,
    /// Whether the pool has been bootstrapped.
    pub initialized: bool,
    /// Number of swaps executed.
    pub swap_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /pools`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolListResponse {
    /// One page of pool summaries.
    pub data: Vec<PoolSummaryDto>,
    /// Pagination metadata.
    pub pagination: super::PaginationMeta,
}

/// Request body for `POST /pools/:id/bootstrap`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BootstrapRequest {
    /// Calling identity; must be the gateway owner.
    pub caller: uuid::Uuid,
    /// Initial asset-side reserve (string-encoded u128), pulled from the
    /// treasury's balance.
    pub amount_asset: String,
    /// Initial usdc-side reserve (string-encoded u128).
    pub amount_usdc: String,
    /// Signed price offset in basis points, `|offset| <= 10000`.
    pub offset_bps: i32,
}

/// Request body for `POST /pools/:id/quote`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteRequest {
    /// Trade direction.
    pub asset_to_usdc: bool,
    /// Input amount (string-encoded u128).
    pub amount_in: String,
}

/// Response body for `POST /pools/:id/quote`.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    /// Pool identifier.
    pub pool_id: PoolId,
    /// Trade direction quoted.
    pub asset_to_usdc: bool,
    /// Input amount (string-encoded).
    pub amount_in: String,
    /// Quoted output amount (string-encoded).
    pub amount_out: String,
    /// Quote timestamp.
    pub quoted_at: DateTime<Utc>,
}
