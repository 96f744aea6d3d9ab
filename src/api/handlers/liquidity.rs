//! Liquidity handlers: mint (with the rebate hook) and burn.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{BurnRequest, BurnResponse, MintRequest, MintResponse, parse_amount};
use crate::app_state::AppState;
use crate::domain::{AccountId, PoolId};
use crate::error::EngineError;

/// `POST /pools/:id/mint` — Deposit a value-equal pair and mint liquidity.
///
/// # Errors
///
/// Returns [`EngineError::ValueImbalance`] when the two sides differ by
/// more than the tolerance, plus pool and balance errors.
pub async fn mint(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<MintRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let pool_id = PoolId::from_uuid(id);
    let amount_asset = parse_amount("amount_asset", &req.amount_asset)?;
    let amount_usdc = parse_amount("amount_usdc", &req.amount_usdc)?;

    let outcome = state
        .mint_hook
        .mint_with_rebate(
            AccountId::from_uuid(req.caller),
            pool_id,
            amount_asset,
            amount_usdc,
        )
        .await?;

    Ok(Json(MintResponse {
        pool_id,
        liquidity_minted: outcome.minted.to_string(),
        net_liquidity: outcome.net_minted.to_string(),
        share_bps: outcome.share_bps.to_string(),
        tier: outcome.tier.tier,
        rebate: outcome.rebate.to_string(),
        retention: outcome.retention.to_string(),
        executed_at: Utc::now(),
    }))
}

/// `POST /pools/:id/burn` — Burn liquidity for a proportional payout.
///
/// # Errors
///
/// Returns [`EngineError::InsufficientLiquidity`] when the caller holds
/// less than the requested amount.
pub async fn burn(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<BurnRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let pool_id = PoolId::from_uuid(id);
    let liquidity = parse_amount("liquidity", &req.liquidity)?;

    let (asset_out, usdc_out) = state
        .engine
        .burn(AccountId::from_uuid(req.caller), pool_id, liquidity)
        .await?;

    Ok(Json(BurnResponse {
        pool_id,
        asset_out: asset_out.to_string(),
        usdc_out: usdc_out.to_string(),
        liquidity_burned: liquidity.to_string(),
        executed_at: Utc::now(),
    }))
}

/// Liquidity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pools/{id}/mint", post(mint))
        .route("/pools/{id}/burn", post(burn))
}
