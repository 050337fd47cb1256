/// Read-only lookup endpoints for MPA ratings and genres
use crate::{
    context::AppContext,
    error::ApiResult,
    models::{Genre, Mpa},
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/mpa", get(list_mpa))
        .route("/mpa/:id", get(get_mpa))
        .route("/genres", get(list_genres))
        .route("/genres/:id", get(get_genre))
}

async fn list_mpa(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Mpa>>> {
    Ok(Json(ctx.ratings.find_all().await?))
}

async fn get_mpa(State(ctx): State<AppContext>, Path(id): Path<i64>) -> ApiResult<Json<Mpa>> {
    Ok(Json(ctx.ratings.find_by_id(id).await?))
}

async fn list_genres(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Genre>>> {
    Ok(Json(ctx.genres.find_all().await?))
}

async fn get_genre(State(ctx): State<AppContext>, Path(id): Path<i64>) -> ApiResult<Json<Genre>> {
    Ok(Json(ctx.genres.find_by_id(id).await?))
}
