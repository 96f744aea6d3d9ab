//! Pool handlers: create, list, get, bootstrap, quote.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    BootstrapRequest, CreatePoolRequest, CreatePoolResponse, PaginationMeta, PaginationParams,
    PoolListResponse, PoolSummaryDto, QuoteRequest, QuoteResponse, parse_amount,
};
use crate::app_state::AppState;
use crate::domain::{AccountId, PoolId, TokenId};
use crate::error::{EngineError, ErrorResponse};

/// `POST /pools` — Create a new pool (owner-gated).
///
/// # Errors
///
/// Returns [`EngineError::NotOwner`] for a non-owner caller.
#[utoipa::path(
    post,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "Create a new pool",
    description = "Creates an empty, uninitialized pool for the given token pair. Owner-gated via the treasury gateway.",
    request_body = CreatePoolRequest,
    responses(
        (status = 201, description = "Pool created successfully", body = CreatePoolResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
    )
)]
pub async fn create_pool(
    State(state): State<AppState>,
    Json(req): Json<CreatePoolRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let pool_id = state
        .gateway
        .create_pool_via_treasury(
            AccountId::from_uuid(req.caller),
            TokenId::from_uuid(req.asset_token),
            TokenId::from_uuid(req.usdc_token),
        )
        .await?;

    let response = CreatePoolResponse {
        pool_id,
        asset_token: req.asset_token,
        usdc_token: req.usdc_token,
        created_at: Utc::now(),
        status: "uninitialized".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /pools` — List all pools with pagination.
#[utoipa::path(
    get,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "List pools",
    description = "Returns a paginated list of all pools, oldest first.",
    responses(
        (status = 200, description = "Paginated pool list", body = PoolListResponse),
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let params = params.clamped();
    let snapshots = state.engine.list_pools().await;

    let total = u32::try_from(snapshots.len()).unwrap_or(u32::MAX);
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Widen before multiplying so an out-of-range page skips everything
    // instead of overflowing u32.
    let start = u64::from(page - 1).saturating_mul(u64::from(per_page));
    let data: Vec<PoolSummaryDto> = snapshots
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(per_page as usize)
        .map(|s| PoolSummaryDto {
            pool_id: s.pool_id,
            reserve_asset: s.reserve_asset.to_string(),
            reserve_usdc: s.reserve_usdc.to_string(),
            initialized: s.initialized,
            swap_count: s.swap_count,
            created_at: s.created_at,
        })
        .collect();

    Json(PoolListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    })
}

/// `GET /pools/:id` — Get pool details.
///
/// # Errors
///
/// Returns [`EngineError::PoolNotFound`] if the pool does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{id}",
    tag = "Pools",
    summary = "Get pool details",
    description = "Returns full details for a single pool including reserves, offset, liquidity, and metadata.",
    params(
        ("id" = uuid::Uuid, Path, description = "Pool UUID"),
    ),
    responses(
        (status = 200, description = "Pool details", body = serde_json::Value),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn get_pool(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, EngineError> {
    let snapshot = state.engine.get_pool(PoolId::from_uuid(id)).await?;

    let response = serde_json::json!({
        "pool_id": snapshot.pool_id,
        "asset_token": snapshot.asset_token,
        "usdc_token": snapshot.usdc_token,
        "custody": snapshot.custody,
        "reserve_asset": snapshot.reserve_asset.to_string(),
        "reserve_usdc": snapshot.reserve_usdc.to_string(),
        "target_offset_bps": snapshot.target_offset_bps,
        "initialized": snapshot.initialized,
        "total_liquidity": snapshot.total_liquidity.to_string(),
        "swap_count": snapshot.swap_count,
        "total_volume": snapshot.total_volume.to_string(),
        "created_at": snapshot.created_at.to_rfc3339(),
        "updated_at": snapshot.last_modified_at.to_rfc3339(),
    });

    Ok(Json(response))
}

/// `POST /pools/:id/bootstrap` — Seed a pool once (owner-gated).
///
/// # Errors
///
/// Returns [`EngineError`] on permission failure, a second bootstrap,
/// zero amounts, or an out-of-bounds offset.
#[utoipa::path(
    post,
    path = "/api/v1/pools/{id}/bootstrap",
    tag = "Pools",
    summary = "Bootstrap a pool",
    description = "Seeds an uninitialized pool with initial reserves and the price offset, pulling both amounts from the treasury. Callable exactly once per pool.",
    params(
        ("id" = uuid::Uuid, Path, description = "Pool UUID"),
    ),
    request_body = BootstrapRequest,
    responses(
        (status = 200, description = "Pool bootstrapped"),
        (status = 400, description = "Invalid amounts or offset", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 409, description = "Pool already initialized", body = ErrorResponse),
    )
)]
pub async fn bootstrap_pool(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<BootstrapRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let pool_id = PoolId::from_uuid(id);
    let amount_asset = parse_amount("amount_asset", &req.amount_asset)?;
    let amount_usdc = parse_amount("amount_usdc", &req.amount_usdc)?;

    state
        .gateway
        .bootstrap_via_treasury(
            AccountId::from_uuid(req.caller),
            pool_id,
            amount_asset,
            amount_usdc,
            req.offset_bps,
        )
        .await?;

    Ok(StatusCode::OK)
}

/// `POST /pools/:id/quote` — Get a swap quote (read-only).
///
/// # Errors
///
/// Returns [`EngineError`] on a missing or uninitialized pool.
#[utoipa::path(
    post,
    path = "/api/v1/pools/{id}/quote",
    tag = "Pools",
    summary = "Get a swap quote",
    description = "Returns the output a single-pool swap would produce without executing it. The pool state is not modified and no fee is applied.",
    params(
        ("id" = uuid::Uuid, Path, description = "Pool UUID"),
    ),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Quote computed", body = QuoteResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
        (status = 422, description = "Pool not initialized or empty", body = ErrorResponse),
    )
)]
pub async fn quote_pool(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<QuoteRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let pool_id = PoolId::from_uuid(id);
    let amount_in = parse_amount("amount_in", &req.amount_in)?;

    let amount_out = state
        .engine
        .quote(pool_id, req.asset_to_usdc, amount_in)
        .await?;

    Ok(Json(QuoteResponse {
        pool_id,
        asset_to_usdc: req.asset_to_usdc,
        amount_in: amount_in.to_string(),
        amount_out: amount_out.to_string(),
        quoted_at: Utc::now(),
    }))
}

/// Pool management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pools", post(create_pool).get(list_pools))
        .route("/pools/{id}", get(get_pool))
        .route("/pools/{id}/bootstrap", post(bootstrap_pool))
        .route("/pools/{id}/quote", post(quote_pool))
}
