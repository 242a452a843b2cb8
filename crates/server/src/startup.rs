use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::recommendation::repo::seaorm::SeaOrmRecommendationRepository;
use service::recommendation::repository::RecommendationRepository;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

// browser front-end is served from another origin
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the SeaORM repository into the service and router.
pub fn build_app(db: DatabaseConnection) -> Router {
    let repo: Arc<dyn RecommendationRepository> = Arc::new(SeaOrmRecommendationRepository::new(db));
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Connect, migrate, and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    info!("database migrations applied");

    let app = build_app(db);

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, "starting recommendations server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
