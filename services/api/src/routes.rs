use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use broker_ai::crm::{engagement_router, EngagementService, EngagementStore};
use broker_ai::error::AppError;
use broker_ai::inspection::{
    inspection_router, ChecklistImporter, ChecklistItem, GradeBreakdown, Inspection,
};
use broker_ai::search::{quick_search_router, CardRepository, QuickSearchService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ChecklistImportRequest {
    #[serde(default)]
    pub(crate) property_id: Option<String>,
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChecklistImportResponse {
    pub(crate) property_id: String,
    pub(crate) grade_description: &'static str,
    #[serde(flatten)]
    pub(crate) breakdown: GradeBreakdown,
    pub(crate) items: Vec<ChecklistItem>,
}

pub(crate) fn with_domain_routes<S, R>(
    engagement: Arc<EngagementService<S>>,
    quick_search: Arc<QuickSearchService<R>>,
) -> Router
where
    S: EngagementStore + 'static,
    R: CardRepository + 'static,
{
    inspection_router()
        .merge(engagement_router(engagement))
        .merge(quick_search_router(quick_search))
        .route("/api/v1/inspections/import", post(checklist_import_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn checklist_import_endpoint(
    Json(payload): Json<ChecklistImportRequest>,
) -> Result<Json<ChecklistImportResponse>, AppError> {
    let ChecklistImportRequest { property_id, csv } = payload;

    let items = ChecklistImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let property_id = property_id.unwrap_or_else(|| "unspecified".to_string());
    let inspection = Inspection::from_items(property_id, items);
    let breakdown = inspection.breakdown();

    Ok(Json(ChecklistImportResponse {
        property_id: inspection.property_id.clone(),
        grade_description: breakdown.grade.description(),
        breakdown,
        items: inspection.items().to_vec(),
    }))
}
