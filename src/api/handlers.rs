//! HTTP handlers. Each one takes a short read (or a single tick) on the
//! monitor and wraps the result in the response envelope.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::defaults::ALERT_QUERY_DEFAULT_LIMIT;
use crate::error::MonitorError;
use crate::pipeline::{LadleMonitor, MonitorStats, StatusCounts, TickReport};
use crate::types::{
    AlertEntry, Analysis, HealthStatus, HistorySample, LadleOverride, LadleReading, PlantZone, ReadingFields,
};

/// State shared by every handler.
#[derive(Clone)]
pub struct DashboardState {
    pub monitor: Arc<LadleMonitor>,
}

impl DashboardState {
    pub fn new(monitor: Arc<LadleMonitor>) -> Self {
        Self { monitor }
    }
}

// ============================================================================
// Response types
// ============================================================================

/// One row of the fleet table.
#[derive(Debug, Serialize)]
pub struct LadleRow {
    pub id: String,
    pub temperature: i32,
    pub stress: i32,
    pub vibration: f64,
    pub location: PlantZone,
    pub status: HealthStatus,
    pub recommendation: String,
}

#[derive(Debug, Serialize)]
pub struct LadleDetail {
    #[serde(flatten)]
    pub reading: LadleReading,
    pub analysis: Analysis,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub ladle_id: String,
    pub samples: Vec<HistorySample>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub ladle_id: String,
    #[serde(flatten)]
    pub analysis: Analysis,
}

#[derive(Debug, Serialize)]
pub struct OverrideResponse {
    pub ladle_id: String,
    pub applied: bool,
    pub tick: u64,
    pub alerts_raised: usize,
    pub timestamp: DateTime<Utc>,
}

impl OverrideResponse {
    fn from_report(ladle_id: String, report: &TickReport) -> Self {
        Self {
            ladle_id,
            applied: report.step.override_applied,
            tick: report.tick,
            alerts_raised: report.alerts,
            timestamp: report.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertEntry>,
    pub capacity: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub counts: StatusCounts,
    pub stats: MonitorStats,
}

#[derive(Debug, Serialize)]
pub struct LoopControlResponse {
    pub running: bool,
    /// False when the loop was already in the requested state
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub running: bool,
    pub ladles: usize,
}

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub limit: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/health
pub async fn health(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(HealthResponse {
        status: "ok",
        running: state.monitor.is_running().await,
        ladles: state.monitor.ids().await.len(),
    })
}

/// GET /api/v1/ladles
pub async fn list_ladles(State(state): State<DashboardState>) -> Response {
    let rows: Vec<LadleRow> = state
        .monitor
        .fleet_status()
        .await
        .into_iter()
        .map(|row| LadleRow {
            id: row.reading.id,
            temperature: row.reading.temperature,
            stress: row.reading.stress,
            vibration: row.reading.vibration,
            location: row.reading.location,
            status: row.analysis.status,
            recommendation: row.analysis.recommendation,
        })
        .collect();
    ApiResponse::ok(rows)
}

/// GET /api/v1/ladles/:id
pub async fn get_ladle(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Response, MonitorError> {
    let reading = state.monitor.reading(&id).await?;
    let analysis = crate::health::classify(&reading);
    Ok(ApiResponse::ok(LadleDetail { reading, analysis }))
}

/// GET /api/v1/ladles/:id/history
pub async fn get_history(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Response, MonitorError> {
    let samples = state.monitor.history(&id).await?;
    Ok(ApiResponse::ok(HistoryResponse { ladle_id: id, samples }))
}

/// GET /api/v1/ladles/:id/analysis
pub async fn get_analysis(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Response, MonitorError> {
    let analysis = state.monitor.classify(&id).await?;
    Ok(ApiResponse::ok(AnalysisResponse { ladle_id: id, analysis }))
}

/// POST /api/v1/ladles/:id/override
///
/// Always 202 for a well-formed body. An id outside the fleet still runs the
/// tick; `applied` is false in that case.
pub async fn post_override(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    body: Result<Json<ReadingFields>, JsonRejection>,
) -> Response {
    let fields = match body {
        Ok(Json(fields)) => fields,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };
    let report = state.monitor.inject_override(&LadleOverride::new(id.clone(), fields)).await;
    ApiResponse::accepted(OverrideResponse::from_report(id, &report))
}

/// POST /api/v1/ladles/:id/anomaly
///
/// Forces the overheat scenario (1625 °C, stress 86, vibration 0.8).
pub async fn post_anomaly(State(state): State<DashboardState>, Path(id): Path<String>) -> Response {
    let report = state.monitor.inject_override(&LadleOverride::forced_overheat(id.clone())).await;
    ApiResponse::accepted(OverrideResponse::from_report(id, &report))
}

/// GET /api/v1/alerts?limit=N
pub async fn get_alerts(
    State(state): State<DashboardState>,
    query: Result<Query<AlertQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };
    let capacity = state.monitor.alert_capacity().await;
    let limit = query.limit.unwrap_or(ALERT_QUERY_DEFAULT_LIMIT).min(capacity);
    ApiResponse::ok(AlertsResponse {
        alerts: state.monitor.recent_alerts(limit).await,
        capacity,
    })
}

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(SummaryResponse {
        counts: state.monitor.status_counts().await,
        stats: state.monitor.stats().await,
    })
}

/// POST /api/v1/simulation/start
pub async fn start_simulation(State(state): State<DashboardState>) -> Response {
    let changed = state.monitor.start_loop().await;
    ApiResponse::ok(LoopControlResponse { running: true, changed })
}

/// POST /api/v1/simulation/stop
pub async fn stop_simulation(State(state): State<DashboardState>) -> Response {
    let changed = state.monitor.stop_loop().await;
    ApiResponse::ok(LoopControlResponse { running: false, changed })
}
