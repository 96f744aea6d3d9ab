//! Owner-gated admin handlers, all routed through the treasury gateway.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    CreditRequest, PauseRequest, SetCapRequest, SetDualOrbitRequest, SetOrbitRequest,
    SetSupplicatorRequest, SetTreasuryRequest, TransferOwnershipRequest, parse_amount,
};
use crate::app_state::AppState;
use crate::domain::{AccountId, PoolId, TokenId};
use crate::error::EngineError;

/// `POST /admin/orbit` — Register a legacy single-path orbit.
///
/// # Errors
///
/// Returns [`EngineError`] on permission or path-validation failure.
pub async fn set_orbit(
    State(state): State<AppState>,
    Json(req): Json<SetOrbitRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let pools: Vec<PoolId> = req.pools.into_iter().map(PoolId::from_uuid).collect();
    state
        .gateway
        .set_orbit_via_treasury(
            AccountId::from_uuid(req.caller),
            PoolId::from_uuid(req.start_pool),
            pools,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/dual-orbit` — Register a dual oscillating orbit.
///
/// # Errors
///
/// Returns [`EngineError`] on permission or path-validation failure.
pub async fn set_dual_orbit(
    State(state): State<AppState>,
    Json(req): Json<SetDualOrbitRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let neg: Vec<PoolId> = req.neg.into_iter().map(PoolId::from_uuid).collect();
    let pos: Vec<PoolId> = req.pos.into_iter().map(PoolId::from_uuid).collect();
    state
        .gateway
        .set_dual_orbit_via_treasury(
            AccountId::from_uuid(req.caller),
            PoolId::from_uuid(req.start_pool),
            neg,
            pos,
            req.start_with_neg,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/cap` — Set the daily event cap.
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
pub async fn set_cap(
    State(state): State<AppState>,
    Json(req): Json<SetCapRequest>,
) -> Result<impl IntoResponse, EngineError> {
    state
        .gateway
        .set_daily_event_cap_via_treasury(AccountId::from_uuid(req.caller), req.cap)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/pause` — Halt swaps and supplications.
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
pub async fn pause(
    State(state): State<AppState>,
    Json(req): Json<PauseRequest>,
) -> Result<impl IntoResponse, EngineError> {
    state
        .gateway
        .pause_via_treasury(AccountId::from_uuid(req.caller))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/unpause` — Resume swaps and supplications.
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
pub async fn unpause(
    State(state): State<AppState>,
    Json(req): Json<PauseRequest>,
) -> Result<impl IntoResponse, EngineError> {
    state
        .gateway
        .unpause_via_treasury(AccountId::from_uuid(req.caller))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/supplicators` — Approve or revoke a supplicator.
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
pub async fn set_supplicator(
    State(state): State<AppState>,
    Json(req): Json<SetSupplicatorRequest>,
) -> Result<impl IntoResponse, EngineError> {
    state
        .gateway
        .set_approved_supplicator(
            AccountId::from_uuid(req.caller),
            AccountId::from_uuid(req.account),
            req.approved,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/ownership` — Transfer gateway ownership immediately.
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
pub async fn transfer_ownership(
    State(state): State<AppState>,
    Json(req): Json<TransferOwnershipRequest>,
) -> Result<impl IntoResponse, EngineError> {
    state
        .gateway
        .transfer_ownership(
            AccountId::from_uuid(req.caller),
            AccountId::from_uuid(req.new_owner),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/treasury` — Point fee collection at a new account.
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
pub async fn set_treasury(
    State(state): State<AppState>,
    Json(req): Json<SetTreasuryRequest>,
) -> Result<impl IntoResponse, EngineError> {
    state
        .gateway
        .set_treasury(
            AccountId::from_uuid(req.caller),
            AccountId::from_uuid(req.new_treasury),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/credit` — Credit a token balance to an account.
///
/// # Errors
///
/// Returns [`EngineError`] on permission failure or overflow.
pub async fn credit(
    State(state): State<AppState>,
    Json(req): Json<CreditRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let amount = parse_amount("amount", &req.amount)?;
    state
        .gateway
        .credit_via_treasury(
            AccountId::from_uuid(req.caller),
            TokenId::from_uuid(req.token),
            AccountId::from_uuid(req.account),
            amount,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/orbit", post(set_orbit))
        .route("/admin/dual-orbit", post(set_dual_orbit))
        .route("/admin/cap", post(set_cap))
        .route("/admin/pause", post(pause))
        .route("/admin/unpause", post(unpause))
        .route("/admin/supplicators", post(set_supplicator))
        .route("/admin/ownership", post(transfer_ownership))
        .route("/admin/treasury", post(set_treasury))
        .route("/admin/credit", post(credit))
}
