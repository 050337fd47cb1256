/// User operations: CRUD, friendship edges, friend queries
use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, User, UserUpdate};
use crate::storage::UserStorage;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub struct UserService {
    storage: Arc<dyn UserStorage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn UserStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_user(&self, payload: NewUser) -> ApiResult<User> {
        validate_user(&payload.email, &payload.login, payload.birthday)?;

        let user = self
            .storage
            .create(User {
                id: 0,
                email: payload.email,
                name: display_name(payload.name, &payload.login),
                login: payload.login,
                birthday: payload.birthday,
            })
            .await?;

        info!("Created user id={} login={}", user.id, user.login);
        Ok(user)
    }

    pub async fn update_user(&self, payload: UserUpdate) -> ApiResult<User> {
        validate_user(&payload.email, &payload.login, payload.birthday)?;
        self.storage.require_exists(payload.id).await?;

        let user = self
            .storage
            .update(User {
                id: payload.id,
                email: payload.email,
                name: display_name(payload.name, &payload.login),
                login: payload.login,
                birthday: payload.birthday,
            })
            .await?;

        info!("Updated user id={}", user.id);
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        self.storage.find_by_id(id).await
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.storage.find_all().await
    }

    pub async fn add_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()> {
        self.storage.require_exists(user_id).await?;
        self.storage.require_exists(friend_id).await?;

        self.storage.add_friend(user_id, friend_id).await?;
        info!("Added friend edge {} -> {}", user_id, friend_id);
        Ok(())
    }

    pub async fn remove_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()> {
        self.storage.require_exists(user_id).await?;
        self.storage.require_exists(friend_id).await?;

        self.storage.remove_friend(user_id, friend_id).await?;
        info!("Removed friend edge {} -> {}", user_id, friend_id);
        Ok(())
    }

    pub async fn get_friends(&self, user_id: i64) -> ApiResult<Vec<User>> {
        self.storage.require_exists(user_id).await?;
        self.storage.find_friends(user_id).await
    }

    pub async fn get_common_friends(&self, user_id: i64, other_id: i64) -> ApiResult<Vec<User>> {
        self.storage.require_exists(user_id).await?;
        self.storage.require_exists(other_id).await?;
        self.storage.find_common_friends(user_id, other_id).await
    }
}

/// Display name defaults to the login when blank or absent
fn display_name(name: Option<String>, login: &str) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => login.to_string(),
    }
}

fn validate_user(email: &str, login: &str, birthday: NaiveDate) -> ApiResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        warn!("Rejected user payload: bad email {:?}", email);
        return Err(ApiError::Validation("Email must contain '@'".to_string()));
    }
    if login.trim().is_empty() || login.chars().any(char::is_whitespace) {
        warn!("Rejected user payload: bad login {:?}", login);
        return Err(ApiError::Validation(
            "Login must be non-blank and contain no whitespace".to_string(),
        ));
    }
    if birthday > Utc::now().date_naive() {
        warn!("Rejected user payload: future birthday {}", birthday);
        return Err(ApiError::Validation(
            "Birthday must not be in the future".to_string(),
        ));
    }
    Ok(())
}
