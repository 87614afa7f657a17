#![allow(dead_code)]

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use tower::ServiceExt;

use portfolio_api::config::AppConfig;
use portfolio_api::database::Database;
use portfolio_api::AppState;

pub const SECRET: &str = "test-secret";
pub const ORIGIN: &str = "https://portfolio.example.com";
pub const SCHEMA: &str = include_str!("../../sql/schema.sql");

// ---------------------------------------------------------------------------
// In-process app over an in-memory database
// ---------------------------------------------------------------------------

/// Single-connection pool so every query sees the same in-memory database.
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

pub async fn test_db() -> Result<Database> {
    let pool = memory_pool().await?;
    pool.execute(SCHEMA).await.context("failed to apply schema")?;
    Ok(Database::from_pool(pool))
}

pub fn build_app(db: Database) -> Result<Router> {
    let config = AppConfig::new(SECRET).with_allowed_origin(ORIGIN);
    Ok(portfolio_api::app(AppState::new(config, db)?))
}

pub async fn test_app() -> Result<(Router, Database)> {
    let db = test_db().await?;
    Ok((build_app(db.clone())?, db))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Result<Response<Body>> {
    Ok(app.clone().oneshot(request).await?)
}

pub async fn get(app: &Router, uri: &str) -> Result<Response<Body>> {
    send(app, Request::get(uri).body(Body::empty())?).await
}

pub async fn options(app: &Router, uri: &str) -> Result<Response<Body>> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    send(app, request).await
}

/// Write request with the valid bearer token.
pub async fn write(app: &Router, method: Method, uri: &str, body: &str) -> Result<Response<Body>> {
    write_with_auth(app, method, uri, body, Some(&format!("Bearer {}", SECRET))).await
}

pub async fn write_with_auth(
    app: &Router,
    method: Method,
    uri: &str,
    body: &str,
    authorization: Option<&str>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    send(app, builder.body(Body::from(body.to_string()))?).await
}

pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>> {
    Ok(to_bytes(response.into_body(), usize::MAX).await?.to_vec())
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = body_bytes(response).await?;
    serde_json::from_slice(&bytes).with_context(|| {
        format!("response body is not JSON: {}", String::from_utf8_lossy(&bytes))
    })
}

pub fn assert_cors<B>(response: &Response<B>) {
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
        Some(ORIGIN.as_bytes()),
        "missing allow-origin on {}",
        response.status()
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).map(|v| v.as_bytes()),
        Some(&b"GET, POST, PUT, DELETE, OPTIONS"[..])
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).map(|v| v.as_bytes()),
        Some(&b"Content-Type, Authorization"[..])
    );
}

// ---------------------------------------------------------------------------
// Seed data, written straight to storage
// ---------------------------------------------------------------------------

pub async fn seed_category(db: &Database, name: &str, project_count: i64) -> Result<i64> {
    let result = sqlx::query("INSERT INTO categories (category_name, project_count) VALUES (?, ?)")
        .bind(name)
        .bind(project_count)
        .execute(db.pool())
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn seed_project(
    db: &Database,
    name: &str,
    category: &str,
    order_number: i64,
    visibility: i64,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO projects (name, short_description, video_link, category_name, order_number, visibility) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(format!("{} summary", name))
    .bind(format!("https://video.example.com/{}", name))
    .bind(category)
    .bind(order_number)
    .bind(visibility)
    .execute(db.pool())
    .await?;
    Ok(result.last_insert_rowid())
}

pub fn names(rows: &Value, field: &str) -> Vec<String> {
    rows.as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| row[field].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Spawned binary, for end-to-end checks over a real socket
// ---------------------------------------------------------------------------

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn spawn(db_path: &Path) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_portfolio-api"));
        cmd.args(["--host", "127.0.0.1", "--port", &port.to_string()])
            .env("SECRET_KEY", SECRET)
            .env("ALLOWED_ORIGIN", ORIGIN)
            .env("DATABASE_URL", format!("sqlite://{}", db_path.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;
        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/api/categories", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Create a SQLite file with the reference schema applied.
pub async fn schema_file(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    pool.execute(SCHEMA).await?;
    pool.close().await;
    Ok(())
}
