//! Engine error types with HTTP status code mapping.
//!
//! [`EngineError`] is the central error type for the router engine and its
//! gateway surface. Every failure is a fully-reverting, synchronous error:
//! no partial state survives a failed operation. Each variant maps to a
//! numeric error code and a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PoolId, TokenId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4003,
///     "message": "slippage exceeded: wanted at least 1000, got 997",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Engine error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request            |
/// | 2000–2999 | State / Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server            | 500 Internal Server Error  |
/// | 4000–4099 | Pool / Swap       | 422 Unprocessable Entity   |
/// | 4030–4039 | Permission        | 403 Forbidden              |
/// | 4290      | Admission control | 429 Too Many Requests      |
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A zero or otherwise degenerate quantity was supplied.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Swap or donation input amount was zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// Price offset outside the permitted basis-point range.
    #[error("offset out of bounds: {0} bps")]
    InvalidOffset(i32),

    /// Mint hook deposit amounts are not value-equal within tolerance.
    #[error("deposit amounts not value-equal: {amount_asset} asset vs {amount_usdc} usdc")]
    ValueImbalance {
        /// Desired asset-side deposit.
        amount_asset: u128,
        /// Desired usdc-side deposit.
        amount_usdc: u128,
    },

    /// Pool with the given ID was not found.
    #[error("pool not found: {0}")]
    PoolNotFound(PoolId),

    /// No orbit (legacy or dual) is registered for the start pool.
    #[error("no orbit registered for start pool {0}")]
    OrbitNotRegistered(PoolId),

    /// Swap execution is halted by the pause switch.
    #[error("router is paused")]
    RouterPaused,

    /// Bootstrap attempted on an already-bootstrapped pool.
    #[error("pool {0} already initialized")]
    AlreadyInitialized(PoolId),

    /// Swap or mint attempted on a pool never bootstrapped.
    #[error("pool {0} not initialized")]
    Uninitialized(PoolId),

    /// Swap attempted against a zero-reserve side.
    #[error("pool {0} has empty reserves")]
    EmptyReserves(PoolId),

    /// Realized output below the caller's stated minimum.
    #[error("slippage exceeded: wanted at least {min_amount_out}, got {actual}")]
    SlippageExceeded {
        /// Caller-specified minimum output.
        min_amount_out: u128,
        /// Realized output.
        actual: u128,
    },

    /// Burn exceeds the owned liquidity share, or the quoted output exceeds
    /// the available output-side reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Ledger balance too low for the requested transfer.
    #[error("insufficient balance of token {token}: required {required}, available {available}")]
    InsufficientBalance {
        /// Token being transferred.
        token: TokenId,
        /// Amount the transfer required.
        required: u128,
        /// Balance actually held.
        available: u128,
    },

    /// Intermediate arithmetic exceeded the 128-bit amount range.
    #[error("amount arithmetic overflow")]
    AmountOverflow,

    /// Orbit registration referenced pools with disagreeing token pairs.
    #[error("token pair mismatch between pools {pool_a} and {pool_b}")]
    TokenMismatch {
        /// Pool whose pair was taken as reference.
        pool_a: PoolId,
        /// Pool whose pair disagreed.
        pool_b: PoolId,
    },

    /// The rolling 24h event counter has reached the configured cap.
    #[error("daily event cap reached: {0}")]
    DailyEventCapReached(u64),

    /// Caller is not the gateway owner.
    #[error("caller is not the owner")]
    NotOwner,

    /// Caller is not the configured treasury.
    #[error("caller is not the treasury")]
    NotTreasury,

    /// Caller is not in the approved-supplicator set.
    #[error("caller is not an approved supplicator")]
    NotApprovedSupplicator,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidAmount(_) => 1002,
            Self::ZeroAmount => 1003,
            Self::InvalidOffset(_) => 1004,
            Self::ValueImbalance { .. } => 1005,
            Self::PoolNotFound(_) => 2001,
            Self::OrbitNotRegistered(_) => 2002,
            Self::RouterPaused => 2003,
            Self::AlreadyInitialized(_) => 2004,
            Self::Internal(_) => 3000,
            Self::Uninitialized(_) => 4001,
            Self::EmptyReserves(_) => 4002,
            Self::SlippageExceeded { .. } => 4003,
            Self::InsufficientLiquidity => 4004,
            Self::InsufficientBalance { .. } => 4005,
            Self::AmountOverflow => 4006,
            Self::TokenMismatch { .. } => 4007,
            Self::NotOwner => 4031,
            Self::NotTreasury => 4032,
            Self::NotApprovedSupplicator => 4033,
            Self::DailyEventCapReached(_) => 4290,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidAmount(_)
            | Self::ZeroAmount
            | Self::InvalidOffset(_)
            | Self::ValueImbalance { .. } => StatusCode::BAD_REQUEST,
            Self::PoolNotFound(_) | Self::OrbitNotRegistered(_) => StatusCode::NOT_FOUND,
            Self::RouterPaused | Self::AlreadyInitialized(_) => StatusCode::CONFLICT,
            Self::Uninitialized(_)
            | Self::EmptyReserves(_)
            | Self::SlippageExceeded { .. }
            | Self::InsufficientLiquidity
            | Self::InsufficientBalance { .. }
            | Self::AmountOverflow
            | Self::TokenMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotOwner | Self::NotTreasury | Self::NotApprovedSupplicator => {
                StatusCode::FORBIDDEN
            }
            Self::DailyEventCapReached(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
