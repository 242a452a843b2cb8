use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::recommendation::{repository::RecommendationRepository, RecommendationService};

use crate::openapi::ApiDoc;

pub mod recommendations;

pub type DynRecommendationService = RecommendationService<dyn RecommendationRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub recommendations: Arc<DynRecommendationService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn RecommendationRepository>) -> Self {
        Self::with_service(RecommendationService::new(repo))
    }

    pub fn with_service(svc: DynRecommendationService) -> Self {
        Self { recommendations: Arc::new(svc) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/recommendations", get(recommendations::list).post(recommendations::create))
        .route("/recommendations/random", get(recommendations::random))
        .route("/recommendations/top/:amount", get(recommendations::top))
        .route("/recommendations/:id", get(recommendations::get))
        .route("/recommendations/:id/upvote", post(recommendations::upvote))
        .route("/recommendations/:id/downvote", post(recommendations::downvote));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
