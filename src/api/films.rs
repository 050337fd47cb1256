/// Film endpoints: CRUD, like edges, popularity ranking
use crate::{
    context::AppContext,
    error::ApiResult,
    models::{Film, FilmUpdate, NewFilm},
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

const DEFAULT_POPULAR_COUNT: i64 = 10;

#[derive(Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/films", get(list_films).post(create_film).put(update_film))
        .route("/films/popular", get(popular_films))
        .route("/films/:id", get(get_film))
        .route(
            "/films/:id/like/:user_id",
            put(add_like).delete(remove_like),
        )
}

async fn create_film(
    State(ctx): State<AppContext>,
    Json(payload): Json<NewFilm>,
) -> ApiResult<Json<Film>> {
    Ok(Json(ctx.films.create_film(payload).await?))
}

async fn update_film(
    State(ctx): State<AppContext>,
    Json(payload): Json<FilmUpdate>,
) -> ApiResult<Json<Film>> {
    Ok(Json(ctx.films.update_film(payload).await?))
}

async fn get_film(State(ctx): State<AppContext>, Path(id): Path<i64>) -> ApiResult<Json<Film>> {
    Ok(Json(ctx.films.get_film(id).await?))
}

async fn list_films(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Film>>> {
    Ok(Json(ctx.films.list_films().await?))
}

async fn add_like(
    State(ctx): State<AppContext>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    ctx.films.add_like(id, user_id).await
}

async fn remove_like(
    State(ctx): State<AppContext>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    ctx.films.remove_like(id, user_id).await
}

async fn popular_films(
    State(ctx): State<AppContext>,
    Query(query): Query<PopularQuery>,
) -> ApiResult<Json<Vec<Film>>> {
    let count = query.count.unwrap_or(DEFAULT_POPULAR_COUNT);
    Ok(Json(ctx.films.get_popular(count).await?))
}
