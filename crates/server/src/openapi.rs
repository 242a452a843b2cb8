use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationDoc { pub name: String, pub youtube_link: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDoc { pub id: i32, pub name: String, pub youtube_link: String, pub score: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::recommendations::create,
        crate::routes::recommendations::list,
        crate::routes::recommendations::get,
        crate::routes::recommendations::random,
        crate::routes::recommendations::top,
        crate::routes::recommendations::upvote,
        crate::routes::recommendations::downvote,
    ),
    components(schemas(HealthResponse, CreateRecommendationDoc, RecommendationDoc)),
    tags((name = "health"), (name = "recommendations"))
)]
pub struct ApiDoc;
