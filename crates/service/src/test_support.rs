#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.clamp(1, cfg.max_connections);
    cfg.acquire_timeout_secs = 10;
    cfg
}

/// Connection to the test database, or `None` when DB tests are disabled.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }

    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&test_config()).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Fresh connection for the current test's runtime
    let db = connect_with_config(&test_config()).await?;
    Ok(Some(db))
}
