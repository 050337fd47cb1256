/// SQLite-backed user storage and friendship edges
use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::storage::UserStorage;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// User storage over the shared connection pool
#[derive(Clone)]
pub struct UserDbStorage {
    db: SqlitePool,
}

impl UserDbStorage {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStorage for UserDbStorage {
    async fn create(&self, user: User) -> ApiResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .execute(&self.db)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            ..user
        })
    }

    async fn update(&self, user: User) -> ApiResult<User> {
        let result = sqlx::query(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4 WHERE id = ?5",
        )
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .bind(user.id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user", user.id));
        }

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<User> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, email, login, name, birthday FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        user.ok_or_else(|| ApiError::not_found("user", id))
    }

    async fn find_all(&self) -> ApiResult<Vec<User>> {
        let users: Vec<User> = sqlx::query_as(
            "SELECT id, email, login, name, birthday FROM users ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    async fn add_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()> {
        // Atomic upsert on the composite key; re-adding is a no-op
        sqlx::query(
            "INSERT INTO friends (user_id, friend_id) VALUES (?1, ?2)
             ON CONFLICT(user_id, friend_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()> {
        sqlx::query("DELETE FROM friends WHERE user_id = ?1 AND friend_id = ?2")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn find_friends(&self, user_id: i64) -> ApiResult<Vec<User>> {
        let users: Vec<User> = sqlx::query_as(
            "SELECT u.id, u.email, u.login, u.name, u.birthday
             FROM friends f
             JOIN users u ON u.id = f.friend_id
             WHERE f.user_id = ?1
             ORDER BY u.id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    async fn find_common_friends(&self, user_id: i64, other_id: i64) -> ApiResult<Vec<User>> {
        let users: Vec<User> = sqlx::query_as(
            "SELECT u.id, u.email, u.login, u.name, u.birthday
             FROM friends f1
             JOIN friends f2 ON f1.friend_id = f2.friend_id
             JOIN users u ON u.id = f1.friend_id
             WHERE f1.user_id = ?1 AND f2.user_id = ?2
             ORDER BY u.id",
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }
}
