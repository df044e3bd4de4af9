//! HTTP server for the delivery cost API.
//!
//! Exposes a single `POST /min-delivery-cost` endpoint that takes an order
//! as a JSON object of product to quantity and answers with the minimum
//! transport cost to fulfil it.

use crate::config::ServiceConfig;
use crate::error::ApiError;
use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    response::Json,
    routing::post,
    Router,
};
use delivery_core::{CostSearchEngine, Order};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const MIN_DELIVERY_COST_PATH: &str = "/min-delivery-cost";

/// Largest request body accepted; bigger bodies are answered with 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
    /// Search engine over the configured catalog
    pub engine: Arc<CostSearchEngine>,
}

/// Successful response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostResponse {
    pub minimum_cost: u64,
}

/// Builds the API router
pub fn router(engine: Arc<CostSearchEngine>) -> Router {
    Router::new()
        .route(
            MIN_DELIVERY_COST_PATH,
            post(handle_min_delivery_cost).fallback(handle_method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(AppState { engine })
}

/// Binds the listener and serves requests until the process stops.
///
/// Failing to bind is returned as an error so the caller can exit non-zero.
pub async fn start_server(config: &ServiceConfig, engine: Arc<CostSearchEngine>) -> anyhow::Result<()> {
    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server running at http://{}", bind_address);

    axum::serve(listener, router(engine))
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}

/// Handles POST /min-delivery-cost requests.
///
/// The body is decoded by hand so every malformed payload within
/// `MAX_BODY_BYTES` maps to 400, regardless of content type. The search
/// runs on the blocking pool so a slow order never stalls the runtime.
async fn handle_min_delivery_cost(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CostResponse>, ApiError> {
    let order = Order::from_json(&body).map_err(|e| {
        tracing::warn!("Rejected order: {}", e);
        ApiError::from(e)
    })?;

    let engine = Arc::clone(&state.engine);
    let (order, plan) = tokio::task::spawn_blocking(move || {
        let plan = engine.plan(&order);
        (order, plan)
    })
    .await
    .map_err(|e| {
        tracing::error!("Cost search task failed: {}", e);
        ApiError::Internal(format!("Cost search failed: {}", e))
    })?;

    match plan {
        Some(plan) => {
            tracing::debug!(
                cost = plan.cost,
                stops = plan.stops(),
                "Order planned"
            );
            Ok(Json(CostResponse {
                minimum_cost: plan.cost,
            }))
        },
        None => Err(ApiError::UnsatisfiableOrder(
            state.engine.catalog().unstocked(&order),
        )),
    }
}

async fn handle_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
