use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
}

/// Bind the real app (Postgres-backed) on an ephemeral port.
/// Returns `None` when no database is configured for tests.
async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing or SKIP_DB_TESTS set; skip e2e tests");
        return Ok(None);
    }

    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let app = server::startup::build_app(db);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(Some(TestApp { base_url }))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_vote_and_remove() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = reqwest::Client::new();
    let name = format!("e2e song {}", Uuid::new_v4());

    let res = c.post(format!("{}/recommendations", app.base_url))
        .json(&json!({"name": name, "youtubeLink": "https://www.youtube.com/watch?v=EG9t7Wsc9YU"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.post(format!("{}/recommendations", app.base_url))
        .json(&json!({"name": name, "youtubeLink": "https://y/other"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // the listing is capped, so locate the new row through the top list at score 0 or below
    let all: Vec<Value> = c.get(format!("{}/recommendations/top/100000", app.base_url)).send().await?.json().await?;
    let created = all.iter().find(|r| r["name"] == name.as_str()).expect("created row listed");
    let id = created["id"].as_i64().expect("numeric id");
    assert_eq!(created["score"], 0);

    let res = c.post(format!("{}/recommendations/{id}/upvote", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let one: Value = c.get(format!("{}/recommendations/{id}", app.base_url)).send().await?.json().await?;
    assert_eq!(one["score"], 1);

    for _ in 0..7 {
        let res = c.post(format!("{}/recommendations/{id}/downvote", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }
    let res = c.get(format!("{}/recommendations/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_top_accepts_any_unsigned_amount() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = reqwest::Client::new();
    let name = format!("e2e top {}", Uuid::new_v4());
    let res = c.post(format!("{}/recommendations", app.base_url))
        .json(&json!({"name": name, "youtubeLink": "https://y/top"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(format!("{}/recommendations/top/0", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 0);

    for amount in ["9223372036854775808", "18446744073709551615"] {
        let res = c.get(format!("{}/recommendations/top/{amount}", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK, "amount {amount}");
        let rows: Vec<Value> = res.json().await?;
        assert!(rows.iter().any(|r| r["name"] == name.as_str()));
        assert!(rows.windows(2).all(|w| w[0]["score"].as_i64() >= w[1]["score"].as_i64()));
    }
    Ok(())
}
