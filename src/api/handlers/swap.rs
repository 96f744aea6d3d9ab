//! Swap handlers: multi-hop orbit swap, permissioned supplicate, and the
//! active-orbit read.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    ActiveOrbitResponse, HopDto, OrbitSwapRequest, SupplicateRequestDto, SwapResponse,
    parse_amount,
};
use crate::app_state::AppState;
use crate::domain::{AccountId, OrbitSide, PoolId};
use crate::engine::{SupplicateRequest, SwapOutcome, SwapRequest};
use crate::error::{EngineError, ErrorResponse};

fn swap_response(outcome: SwapOutcome) -> SwapResponse {
    SwapResponse {
        total_amount_out: outcome.total_amount_out.to_string(),
        hops: outcome
            .hops
            .iter()
            .map(|hop| HopDto {
                pool_id: hop.pool_id,
                asset_to_usdc: hop.asset_to_usdc,
                amount_in: hop.amount_in.to_string(),
                amount_out: hop.amount_out.to_string(),
                total_fee: hop.fee.total.to_string(),
                treasury_cut: hop.fee.treasury_cut.to_string(),
                pool_donation: hop.fee.pool_donation.to_string(),
            })
            .collect(),
        flipped_to: outcome.flipped_to.map(|side| {
            match side {
                OrbitSide::Neg => "neg",
                OrbitSide::Pos => "pos",
            }
            .to_string()
        }),
        executed_at: Utc::now(),
    }
}

/// `POST /swap` — Execute a multi-hop orbit swap.
///
/// # Errors
///
/// Returns [`EngineError`] when paused, capped, unregistered, or on any
/// per-hop failure; all failures fully revert.
#[utoipa::path(
    post,
    path = "/api/v1/swap",
    tag = "Swaps",
    summary = "Execute an orbit swap",
    description = "Resolves the active orbit for the start pool and executes one independent hop per orbit pool, each re-using the original input amount. Hop outputs accumulate into the total; a dual orbit flips its active side afterwards.",
    request_body = OrbitSwapRequest,
    responses(
        (status = 200, description = "Swap executed", body = SwapResponse),
        (status = 404, description = "No orbit registered for the start pool", body = ErrorResponse),
        (status = 409, description = "Router is paused", body = ErrorResponse),
        (status = 422, description = "Slippage or liquidity failure", body = ErrorResponse),
        (status = 429, description = "Daily event cap reached", body = ErrorResponse),
    )
)]
pub async fn execute_swap(
    State(state): State<AppState>,
    Json(req): Json<OrbitSwapRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let amount_in = parse_amount("amount_in", &req.amount_in)?;
    let min_total_amount_out = match &req.min_total_amount_out {
        Some(value) => parse_amount("min_total_amount_out", value)?,
        None => 0,
    };

    let outcome = state
        .engine
        .swap(SwapRequest {
            start_pool: PoolId::from_uuid(req.start_pool),
            asset_to_usdc: req.asset_to_usdc,
            amount_in,
            min_total_amount_out,
            payer: AccountId::from_uuid(req.payer),
            to: AccountId::from_uuid(req.to),
        })
        .await?;

    Ok(Json(swap_response(outcome)))
}

/// `POST /supplicate` — Execute the permissioned single-pool swap.
///
/// # Errors
///
/// Returns [`EngineError::NotApprovedSupplicator`] for unapproved
/// callers, plus every swap-path error.
#[utoipa::path(
    post,
    path = "/api/v1/supplicate",
    tag = "Swaps",
    summary = "Execute a single-pool supplication",
    description = "Runs the router's fee split against exactly one pool, independent of any orbit registration. Restricted to approved supplicators.",
    request_body = SupplicateRequestDto,
    responses(
        (status = 200, description = "Supplication executed", body = SwapResponse),
        (status = 403, description = "Caller is not an approved supplicator", body = ErrorResponse),
        (status = 409, description = "Router is paused", body = ErrorResponse),
        (status = 429, description = "Daily event cap reached", body = ErrorResponse),
    )
)]
pub async fn execute_supplicate(
    State(state): State<AppState>,
    Json(req): Json<SupplicateRequestDto>,
) -> Result<impl IntoResponse, EngineError> {
    let amount_in = parse_amount("amount_in", &req.amount_in)?;
    let min_amount_out = match &req.min_amount_out {
        Some(value) => parse_amount("min_amount_out", value)?,
        None => 0,
    };

    let outcome = state
        .engine
        .supplicate(SupplicateRequest {
            caller: AccountId::from_uuid(req.caller),
            pool: PoolId::from_uuid(req.pool),
            asset_to_usdc: req.asset_to_usdc,
            amount_in,
            min_amount_out,
            payer: AccountId::from_uuid(req.payer),
            to: AccountId::from_uuid(req.to),
        })
        .await?;

    Ok(Json(swap_response(outcome)))
}

/// `GET /orbits/:start_pool` — The orbit the next swap will use.
///
/// # Errors
///
/// Returns [`EngineError::OrbitNotRegistered`] when nothing is
/// registered for the start pool.
#[utoipa::path(
    get,
    path = "/api/v1/orbits/{start_pool}",
    tag = "Swaps",
    summary = "Get the active orbit",
    description = "Returns the ordered pool path and, for dual orbits, which side is currently active.",
    params(
        ("start_pool" = uuid::Uuid, Path, description = "Start pool UUID"),
    ),
    responses(
        (status = 200, description = "Active orbit", body = ActiveOrbitResponse),
        (status = 404, description = "No orbit registered", body = ErrorResponse),
    )
)]
pub async fn get_active_orbit(
    State(state): State<AppState>,
    Path(start_pool): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, EngineError> {
    let start_pool = PoolId::from_uuid(start_pool);
    let orbit = state.engine.get_active_orbit(start_pool).await?;

    Ok(Json(ActiveOrbitResponse {
        start_pool,
        pools: orbit.pools,
        using_neg: orbit.using_neg,
    }))
}

/// Swap routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/swap", post(execute_swap))
        .route("/supplicate", post(execute_supplicate))
        .route("/orbits/{start_pool}", get(get_active_orbit))
}
