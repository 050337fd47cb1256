/// SQLite-backed read-only lookup tables (MPA ratings, genres)
use crate::error::{ApiError, ApiResult};
use crate::models::{Genre, Mpa};
use crate::storage::{GenreStorage, MpaStorage};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct MpaDbStorage {
    db: SqlitePool,
}

impl MpaDbStorage {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MpaStorage for MpaDbStorage {
    async fn find_all(&self) -> ApiResult<Vec<Mpa>> {
        let rows: Vec<Mpa> = sqlx::query_as("SELECT id, name FROM mpa ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<Mpa> {
        let row: Option<Mpa> = sqlx::query_as("SELECT id, name FROM mpa WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.ok_or_else(|| ApiError::not_found("mpa", id))
    }
}

#[derive(Clone)]
pub struct GenreDbStorage {
    db: SqlitePool,
}

impl GenreDbStorage {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreStorage for GenreDbStorage {
    async fn find_all(&self) -> ApiResult<Vec<Genre>> {
        let rows: Vec<Genre> = sqlx::query_as("SELECT id, name FROM genres ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<Genre> {
        let row: Option<Genre> = sqlx::query_as("SELECT id, name FROM genres WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.ok_or_else(|| ApiError::not_found("genre", id))
    }
}
