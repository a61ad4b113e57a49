//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::domain::{AuthenticatedIdentity, OperationContext, TransferRecord, TransferTotals};
use crate::error::AppError;

use super::middleware::{context_middleware, logging_middleware, require_identity};
use super::AppState;

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/transfers/user/:user_id",
            get(get_user_transfers).post(submit_transfer),
        )
        .route_layer(middleware::from_fn_with_state(state, require_identity));

    Router::new()
        .route("/transfers", get(get_transfer_totals))
        .merge(protected)
}

/// Build the full application: health check, API under `/api`, and the
/// context/logging/trace layers.
pub fn build_router(state: AppState) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: trace -> context -> logging -> handler
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", create_router(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(context_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// =========================================================================
// GET /transfers
// =========================================================================

/// Total amount and number of recorded transfers
async fn get_transfer_totals(
    State(state): State<AppState>,
) -> Result<Json<TransferTotals>, AppError> {
    let totals = state.report_handler().totals().await?;
    Ok(Json(totals))
}

// =========================================================================
// GET /transfers/user/:user_id
// =========================================================================

/// Transfers sent or received by the caller
async fn get_user_transfers(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<Json<Vec<TransferRecord>>, AppError> {
    let user_id = state.validator().authorize(&user_id, &identity)?;
    let transfers = state.report_handler().history(user_id).await?;
    Ok(Json(transfers))
}

// =========================================================================
// POST /transfers/user/:user_id
// =========================================================================

/// Submit a transfer from the caller to another user by username.
///
/// The body is read raw so that identity checks run before its shape
/// is looked at.
async fn submit_transfer(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    context: Option<Extension<OperationContext>>,
    body: Bytes,
) -> Result<(StatusCode, Json<TransferRecord>), AppError> {
    let context = context.map(|Extension(ctx)| ctx).unwrap_or_default();

    let command = state.validator().validate(&user_id, &identity, &body)?;
    let record = state.transfer_handler().execute(command, &context).await?;

    Ok((StatusCode::CREATED, Json(record)))
}
