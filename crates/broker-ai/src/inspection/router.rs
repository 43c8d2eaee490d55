use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::ChecklistItem;
use super::grading::{breakdown, GradeBreakdown};
use super::template::ChecklistTemplate;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub grade_description: &'static str,
    #[serde(flatten)]
    pub breakdown: GradeBreakdown,
}

/// Stateless endpoints for checklist grading.
pub fn inspection_router() -> Router {
    Router::new()
        .route("/api/v1/inspections/grade", post(grade_handler))
        .route("/api/v1/inspections/template", get(template_handler))
}

pub(crate) async fn grade_handler(Json(request): Json<GradeRequest>) -> Response {
    let breakdown = breakdown(&request.items);
    let body = GradeResponse {
        grade_description: breakdown.grade.description(),
        breakdown,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn template_handler() -> Json<ChecklistTemplate> {
    Json(ChecklistTemplate::standard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(router: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds");
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn grades_posted_checklists() {
        let payload = json!({
            "items": [
                { "id": "a", "category": "외부", "label": "외벽 균열", "status": "good" },
                { "id": "b", "category": "외부", "label": "현관문", "status": "good" },
                { "id": "c", "category": "내부", "label": "바닥재", "status": "good" },
                { "id": "d", "category": "내부", "label": "조명", "status": "good" },
                { "id": "e", "category": "안전", "label": "소화기", "status": "fair" },
                { "id": "f", "category": "안전", "label": "가스 밸브", "status": null }
            ]
        });

        let (status, body) = post_json(inspection_router(), "/api/v1/inspections/grade", payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["grade"], "A");
        assert_eq!(body["rated"], 5);
        assert_eq!(body["good"], 4);
    }

    #[tokio::test]
    async fn empty_checklist_is_graded_c() {
        let (status, body) =
            post_json(inspection_router(), "/api/v1/inspections/grade", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["grade"], "C");
        assert_eq!(body["rated"], 0);
    }

    #[tokio::test]
    async fn template_lists_categories() {
        let request = Request::get("/api/v1/inspections/template")
            .body(Body::empty())
            .expect("request builds");
        let response = inspection_router()
            .oneshot(request)
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["categories"][0]["key"], "exterior");
    }
}
