//! Liquidity operation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PoolId;

/// Request body for `POST /pools/:id/mint`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MintRequest {
    /// Depositor identity funding both amounts.
    pub caller: uuid::Uuid,
    /// Asset-side deposit (string-encoded u128).
    pub amount_asset: String,
    /// Usdc-side deposit (string-encoded u128). Must be value-equal to
    /// the asset side within 1%.
    pub amount_usdc: String,
}

/// Response body for `POST /pools/:id/mint`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MintResponse {
    /// Pool identifier.
    pub pool_id: PoolId,
    /// Liquidity minted before the rebate skim (string-encoded).
    pub liquidity_minted: String,
    /// Liquidity the depositor keeps after the skim (string-encoded).
    pub net_liquidity: String,
    /// Deposit share of post-deposit TVL in basis points.
    pub share_bps: String,
    /// Rebate tier the deposit qualified for (0 = none).
    pub tier: u8,
    /// Units moved to the rebate vault (string-encoded).
    pub rebate: String,
    /// Units retained by the treasury (string-encoded).
    pub retention: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}

/// Request body for `POST /pools/:id/burn`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BurnRequest {
    /// Liquidity owner burning their share.
    pub caller: uuid::Uuid,
    /// Liquidity units to burn (string-encoded u128).
    pub liquidity: String,
}

/// Response body for `POST /pools/:id/burn`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BurnResponse {
    /// Pool identifier.
    pub pool_id: PoolId,
    /// Asset-side amount paid out (string-encoded).
    pub asset_out: String,
    /// Usdc-side amount paid out (string-encoded).
    pub usdc_out: String,
    /// Liquidity units burned (string-encoded).
    pub liquidity_burned: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}
