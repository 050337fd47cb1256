/// User endpoints: CRUD plus friendship edges and friend queries
use crate::{
    context::AppContext,
    error::ApiResult,
    models::{NewUser, User, UserUpdate},
};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/users", get(list_users).post(create_user).put(update_user))
        .route("/users/:id", get(get_user))
        .route("/users/:id/friends", get(get_friends))
        .route("/users/:id/friends/common/:other_id", get(get_common_friends))
        .route(
            "/users/:id/friends/:friend_id",
            put(add_friend).delete(remove_friend),
        )
}

async fn create_user(
    State(ctx): State<AppContext>,
    Json(payload): Json<NewUser>,
) -> ApiResult<Json<User>> {
    Ok(Json(ctx.users.create_user(payload).await?))
}

async fn update_user(
    State(ctx): State<AppContext>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    Ok(Json(ctx.users.update_user(payload).await?))
}

async fn get_user(State(ctx): State<AppContext>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    Ok(Json(ctx.users.get_user(id).await?))
}

async fn list_users(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(ctx.users.list_users().await?))
}

async fn add_friend(
    State(ctx): State<AppContext>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    ctx.users.add_friend(id, friend_id).await
}

async fn remove_friend(
    State(ctx): State<AppContext>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    ctx.users.remove_friend(id, friend_id).await
}

async fn get_friends(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(ctx.users.get_friends(id).await?))
}

async fn get_common_friends(
    State(ctx): State<AppContext>,
    Path((id, other_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(ctx.users.get_common_friends(id, other_id).await?))
}
