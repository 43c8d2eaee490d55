use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::ledger::{CustomerId, EngagementService, EngagementStore};

#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub activity_type: String,
}

/// Router exposing activity capture and score lookup.
pub fn engagement_router<S>(service: Arc<EngagementService<S>>) -> Router
where
    S: EngagementStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/customers/:customer_id/activities",
            post(activity_handler::<S>),
        )
        .route(
            "/api/v1/customers/:customer_id/score",
            get(score_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn activity_handler<S>(
    State(service): State<Arc<EngagementService<S>>>,
    Path(customer_id): Path<String>,
    Json(request): Json<ActivityRequest>,
) -> Response
where
    S: EngagementStore + 'static,
{
    let customer = CustomerId(customer_id);
    match service.record_activity(&customer, &request.activity_type) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<EngagementService<S>>>,
    Path(customer_id): Path<String>,
) -> Response
where
    S: EngagementStore + 'static,
{
    let customer = CustomerId(customer_id);
    match service.score(&customer) {
        Ok(score) => {
            let payload = json!({ "customer_id": customer.0, "score": score });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::ledger::{InMemoryEngagementStore, StoreError};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    struct OfflineStore;

    impl EngagementStore for OfflineStore {
        fn increment(&self, _: &CustomerId, _: u32) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("rpc timeout".to_string()))
        }

        fn score(&self, _: &CustomerId) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Unavailable("rpc timeout".to_string()))
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn activity(uri: &str, activity_type: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "activity_type": activity_type }).to_string(),
            ))
            .expect("request builds")
    }

    #[tokio::test]
    async fn records_activity_and_reports_score() {
        let service = Arc::new(EngagementService::new(Arc::new(
            InMemoryEngagementStore::default(),
        )));
        let router = engagement_router(service);

        let response = router
            .clone()
            .oneshot(activity("/api/v1/customers/c-1/activities", "contract_view"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["increment"], 40);
        assert_eq!(body["total"], 40);

        let response = router
            .oneshot(
                Request::get("/api/v1/customers/c-1/score")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let body = body_json(response).await;
        assert_eq!(body["score"], 40);
    }

    #[tokio::test]
    async fn store_failures_surface_as_unavailable() {
        let service = Arc::new(EngagementService::new(Arc::new(OfflineStore)));
        let response = activity_handler::<OfflineStore>(
            State(service),
            Path("c-9".to_string()),
            Json(ActivityRequest {
                activity_type: "view".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("rpc timeout"));
    }
}
