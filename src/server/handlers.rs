//! Route handlers.

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::error::StorageError;
use crate::pipeline::Trigger;
use crate::storage::{Tool, ToolStats};
use crate::types::{EmailAddress, Frequency};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Maximum tools returned by the listing endpoint.
pub const RECENT_TOOLS_LIMIT: usize = 50;

const SUBSCRIBED_MESSAGE: &str =
    "Successfully subscribed! You will receive updates about new AI tools.";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Response to a manual scan.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub success: bool,
    pub new_tools: usize,
    pub total: usize,
}

/// Response to a scheduled scan.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronResponse {
    pub success: bool,
    pub new_tools: usize,
    pub timestamp: DateTime<Utc>,
}

/// Response to the tool listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub success: bool,
    pub tools: Vec<Tool>,
}

/// Subscription request body. Both fields are optional so missing values
/// get the same validation message as malformed ones.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub frequency: Option<String>,
}

/// Response to a successful subscription.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

pub(super) async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Manual trigger: scan and notify immediate subscribers.
pub(super) async fn scan(State(state): State<Arc<AppState>>) -> ApiResult<Json<ScanResponse>> {
    info!("Starting AI tools scan");

    let outcome = state.pipeline.run(Trigger::Manual).await.map_err(|e| {
        error!(error = %e, "Scan failed");
        ApiError::Internal(format!("Scan failed: {e}"))
    })?;

    Ok(Json(ScanResponse {
        success: true,
        new_tools: outcome.added_count(),
        total: outcome.candidates,
    }))
}

/// Scheduled trigger: authorize, scan, and send any digests that are due.
pub(super) async fn cron(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<CronResponse>> {
    if let Some(secret) = state.cron_secret.as_deref() {
        let expected = format!("Bearer {secret}");
        let provided = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            warn!("Rejected scheduled scan with missing or wrong bearer token");
            return Err(ApiError::Unauthorized);
        }
    }

    info!("Running scheduled scan");

    let outcome = state.pipeline.run(Trigger::Scheduled).await.map_err(|e| {
        error!(error = %e, "Cron error");
        ApiError::Internal(format!("Cron job failed: {e}"))
    })?;

    Ok(Json(CronResponse {
        success: true,
        new_tools: outcome.added_count(),
        timestamp: outcome.finished_at,
    }))
}

/// Most recently discovered tools, newest first.
pub(super) async fn tools(State(state): State<Arc<AppState>>) -> ApiResult<Json<ToolsResponse>> {
    let tools = state
        .store
        .recent_tools(RECENT_TOOLS_LIMIT)
        .await
        .map_err(|e| {
            error!(error = %e, "Get tools error");
            ApiError::Internal("Failed to fetch tools".to_string())
        })?;

    Ok(Json(ToolsResponse {
        success: true,
        tools,
    }))
}

/// Discovery counts; "today" starts at the server's local midnight.
pub(super) async fn stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<ToolStats>> {
    let tools = state.store.list_tools().await.map_err(|e| {
        error!(error = %e, "Get stats error");
        ApiError::Internal("Failed to fetch stats".to_string())
    })?;

    Ok(Json(ToolStats::compute(&tools, Local::now())))
}

/// Register a subscriber.
pub(super) async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<Json<SubscribeResponse>> {
    let Json(request) = body.map_err(|e| {
        debug!(error = %e, "Rejected subscribe body");
        ApiError::BadRequest("Valid email is required".to_string())
    })?;

    let email = request
        .email
        .as_deref()
        .and_then(|e| EmailAddress::parse(e).ok())
        .ok_or_else(|| ApiError::BadRequest("Valid email is required".to_string()))?;

    let frequency = match request.frequency.as_deref() {
        None => Frequency::default(),
        Some(raw) => raw
            .parse::<Frequency>()
            .map_err(|_| ApiError::BadRequest(format!("Invalid frequency: {raw}")))?,
    };

    match state.store.add_subscriber(email, frequency).await {
        Ok(subscriber) => {
            info!(email = %subscriber.email, %frequency, "New subscriber");
            Ok(Json(SubscribeResponse {
                success: true,
                message: SUBSCRIBED_MESSAGE.to_string(),
            }))
        }
        Err(StorageError::DuplicateSubscriber(_)) => {
            Err(ApiError::BadRequest("Email already subscribed".to_string()))
        }
        Err(e) => {
            error!(error = %e, "Subscribe error");
            Err(ApiError::Internal("Failed to subscribe".to_string()))
        }
    }
}
