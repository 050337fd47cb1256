/// Shared test fixture: an in-memory SQLite pool with the embedded
/// migrations applied.
use cinetrack::db;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub async fn test_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory
    // database; disabled timeouts keep it from being reaped mid-test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");

    db::run_migrations(&pool).await.expect("run migrations");
    pool
}
