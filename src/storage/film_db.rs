/// SQLite-backed film storage: film rows, genre assignments, like edges
use crate::error::{ApiError, ApiResult};
use crate::models::{Film, FilmRecord, Genre, Mpa};
use crate::storage::FilmStorage;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Film storage over the shared connection pool
#[derive(Clone)]
pub struct FilmDbStorage {
    db: SqlitePool,
}

const FILM_SELECT: &str = "SELECT f.id, f.name, f.description, f.release_date, f.duration,
       m.id AS mpa_id, m.name AS mpa_name
FROM films f
LEFT JOIN mpa m ON f.mpa_id = m.id";

impl FilmDbStorage {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    fn map_film_row(row: &SqliteRow) -> Film {
        let mpa = row
            .get::<Option<i64>, _>("mpa_id")
            .map(|id| Mpa {
                id,
                name: row.get("mpa_name"),
            });

        Film {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            release_date: row.get("release_date"),
            duration: row.get("duration"),
            mpa,
            genres: Vec::new(),
        }
    }

    /// Genres assigned to a film, reconstructed in ascending genre id order
    async fn load_genres(&self, film_id: i64) -> ApiResult<Vec<Genre>> {
        let genres: Vec<Genre> = sqlx::query_as(
            "SELECT g.id, g.name
             FROM film_genres fg
             JOIN genres g ON g.id = fg.genre_id
             WHERE fg.film_id = ?1
             ORDER BY g.id",
        )
        .bind(film_id)
        .fetch_all(&self.db)
        .await?;

        Ok(genres)
    }

    /// Full replacement of a film's genre assignment set. Duplicate ids
    /// collapse on the junction table's composite key.
    async fn replace_genres(&self, film_id: i64, genre_ids: &[i64]) -> ApiResult<()> {
        sqlx::query("DELETE FROM film_genres WHERE film_id = ?1")
            .bind(film_id)
            .execute(&self.db)
            .await?;

        for genre_id in genre_ids {
            sqlx::query(
                "INSERT INTO film_genres (film_id, genre_id) VALUES (?1, ?2)
                 ON CONFLICT(film_id, genre_id) DO NOTHING",
            )
            .bind(film_id)
            .bind(genre_id)
            .execute(&self.db)
            .await?;
        }

        Ok(())
    }

    async fn attach_genres(&self, mut films: Vec<Film>) -> ApiResult<Vec<Film>> {
        for film in &mut films {
            film.genres = self.load_genres(film.id).await?;
        }
        Ok(films)
    }
}

#[async_trait]
impl FilmStorage for FilmDbStorage {
    async fn create(&self, film: &FilmRecord) -> ApiResult<Film> {
        let result = sqlx::query(
            "INSERT INTO films (name, description, release_date, duration, mpa_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa_id)
        .execute(&self.db)
        .await?;

        let film_id = result.last_insert_rowid();
        self.replace_genres(film_id, &film.genre_ids).await?;

        self.find_by_id(film_id).await
    }

    async fn update(&self, id: i64, film: &FilmRecord) -> ApiResult<Film> {
        let result = sqlx::query(
            "UPDATE films SET name = ?1, description = ?2, release_date = ?3,
                 duration = ?4, mpa_id = ?5
             WHERE id = ?6",
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa_id)
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("film", id));
        }

        self.replace_genres(id, &film.genre_ids).await?;

        self.find_by_id(id).await
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<Film> {
        let row = sqlx::query(&format!("{FILM_SELECT} WHERE f.id = ?1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        let row = row.ok_or_else(|| ApiError::not_found("film", id))?;

        let mut film = Self::map_film_row(&row);
        film.genres = self.load_genres(film.id).await?;

        Ok(film)
    }

    async fn find_all(&self) -> ApiResult<Vec<Film>> {
        let rows = sqlx::query(&format!("{FILM_SELECT} ORDER BY f.id"))
            .fetch_all(&self.db)
            .await?;

        let films = rows.iter().map(Self::map_film_row).collect();
        self.attach_genres(films).await
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> ApiResult<()> {
        // Atomic upsert on the composite key; re-liking is a no-op
        sqlx::query(
            "INSERT INTO likes (film_id, user_id) VALUES (?1, ?2)
             ON CONFLICT(film_id, user_id) DO NOTHING",
        )
        .bind(film_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> ApiResult<()> {
        sqlx::query("DELETE FROM likes WHERE film_id = ?1 AND user_id = ?2")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn find_popular(&self, count: i64) -> ApiResult<Vec<Film>> {
        // SQLite treats a negative LIMIT as unlimited, so guard here
        if count <= 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            "SELECT f.id, f.name, f.description, f.release_date, f.duration,
                    m.id AS mpa_id, m.name AS mpa_name,
                    COUNT(l.user_id) AS likes_count
             FROM films f
             LEFT JOIN likes l ON f.id = l.film_id
             LEFT JOIN mpa m ON f.mpa_id = m.id
             GROUP BY f.id, m.id, m.name
             ORDER BY likes_count DESC, f.id ASC
             LIMIT ?1",
        )
        .bind(count)
        .fetch_all(&self.db)
        .await?;

        let films = rows.iter().map(Self::map_film_row).collect();
        self.attach_genres(films).await
    }
}
