use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use models::recommendation::{validate_name, validate_youtube_link};
use service::errors::ServiceError;
use service::recommendation::{NewRecommendation, Recommendation};

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRecommendationInput {
    pub name: String,
    pub youtube_link: String,
}

impl CreateRecommendationInput {
    fn validate(self) -> Result<NewRecommendation, ServiceError> {
        validate_name(&self.name)?;
        validate_youtube_link(&self.youtube_link)?;
        Ok(NewRecommendation { name: self.name, youtube_link: self.youtube_link })
    }
}

#[utoipa::path(
    post, path = "/recommendations", tag = "recommendations",
    request_body = crate::openapi::CreateRecommendationDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateRecommendationInput>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    // any malformed or missing body is a shape error, not a 400/415
    let Json(input) = payload.map_err(|e| {
        debug!(rejection = %e.body_text(), "create payload rejected");
        JsonApiError::unprocessable(e.body_text())
    })?;
    let input = input.validate()?;
    state.recommendations.insert(input).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get, path = "/recommendations", tag = "recommendations",
    responses((status = 200, description = "Up to 10 recommendations", body = [crate::openapi::RecommendationDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Recommendation>>, JsonApiError> {
    let list = state.recommendations.get().await?;
    info!(count = list.len(), "list recommendations");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/recommendations/{id}", tag = "recommendations",
    params(("id" = i32, Path, description = "Recommendation id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::RecommendationDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Recommendation>, JsonApiError> {
    Ok(Json(state.recommendations.get_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/recommendations/random", tag = "recommendations",
    responses(
        (status = 200, description = "OK", body = crate::openapi::RecommendationDoc),
        (status = 404, description = "No recommendations")
    )
)]
pub async fn random(State(state): State<ServerState>) -> Result<Json<Recommendation>, JsonApiError> {
    Ok(Json(state.recommendations.get_random().await?))
}

#[utoipa::path(
    get, path = "/recommendations/top/{amount}", tag = "recommendations",
    params(("amount" = u64, Path, description = "Maximum number of items")),
    responses((status = 200, description = "Highest scores first", body = [crate::openapi::RecommendationDoc]))
)]
pub async fn top(State(state): State<ServerState>, Path(amount): Path<u64>) -> Result<Json<Vec<Recommendation>>, JsonApiError> {
    Ok(Json(state.recommendations.get_top(amount).await?))
}

#[utoipa::path(
    post, path = "/recommendations/{id}/upvote", tag = "recommendations",
    params(("id" = i32, Path, description = "Recommendation id")),
    responses((status = 200, description = "Upvoted"), (status = 404, description = "Not Found"))
)]
pub async fn upvote(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.recommendations.upvote(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post, path = "/recommendations/{id}/downvote", tag = "recommendations",
    params(("id" = i32, Path, description = "Recommendation id")),
    responses((status = 200, description = "Downvoted, removed below -5"), (status = 404, description = "Not Found"))
)]
pub async fn downvote(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.recommendations.downvote(id).await?;
    Ok(StatusCode::OK)
}
