use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{CardRepository, QuickSearchCard, QuickSearchService, RepositoryError};
use super::conditions::{ConditionMap, ResolvedConditions};
use super::tags::{tag_conditions, TagCondition};

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub conditions: ConditionMap,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub is_custom: bool,
}

#[derive(Debug, Serialize)]
pub struct ResolvedCardView {
    pub card: QuickSearchCard,
    pub resolved: ResolvedConditions,
}

pub fn quick_search_router<R>(service: Arc<QuickSearchService<R>>) -> Router
where
    R: CardRepository + 'static,
{
    Router::new()
        .route("/api/v1/quick-search/cards", get(cards_handler::<R>))
        .route(
            "/api/v1/quick-search/cards/:card_id/resolved",
            get(resolved_card_handler::<R>),
        )
        .route("/api/v1/quick-search/resolve", post(resolve_handler::<R>))
        .route(
            "/api/v1/quick-search/tag-conditions",
            get(tag_conditions_handler),
        )
        .with_state(service)
}

pub(crate) async fn cards_handler<R>(State(service): State<Arc<QuickSearchService<R>>>) -> Response
where
    R: CardRepository + 'static,
{
    match service.cards() {
        Ok(cards) => (StatusCode::OK, Json(cards)).into_response(),
        Err(err) => repository_error(err),
    }
}

pub(crate) async fn resolved_card_handler<R>(
    State(service): State<Arc<QuickSearchService<R>>>,
    Path(card_id): Path<String>,
) -> Response
where
    R: CardRepository + 'static,
{
    match service.resolve_card(&card_id) {
        Ok((card, resolved)) => {
            (StatusCode::OK, Json(ResolvedCardView { card, resolved })).into_response()
        }
        Err(err) => repository_error(err),
    }
}

pub(crate) async fn resolve_handler<R>(
    State(service): State<Arc<QuickSearchService<R>>>,
    Json(request): Json<ResolveRequest>,
) -> Json<ResolvedConditions>
where
    R: CardRepository + 'static,
{
    Json(service.resolve(&request.conditions, &request.label, request.is_custom))
}

pub(crate) async fn tag_conditions_handler() -> Json<&'static [TagCondition]> {
    Json(tag_conditions())
}

fn repository_error(err: RepositoryError) -> Response {
    let status = match err {
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
