/// Film operations: CRUD, like edges, popularity ranking
use crate::error::{ApiError, ApiResult};
use crate::models::{Film, FilmRecord, FilmUpdate, IdRef, NewFilm};
use crate::storage::{FilmStorage, GenreStorage, MpaStorage, UserStorage};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// First public film screening; no release date may precede it
fn cinema_birthday() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

pub struct FilmService {
    films: Arc<dyn FilmStorage>,
    users: Arc<dyn UserStorage>,
    ratings: Arc<dyn MpaStorage>,
    genres: Arc<dyn GenreStorage>,
}

impl FilmService {
    pub fn new(
        films: Arc<dyn FilmStorage>,
        users: Arc<dyn UserStorage>,
        ratings: Arc<dyn MpaStorage>,
        genres: Arc<dyn GenreStorage>,
    ) -> Self {
        Self {
            films,
            users,
            ratings,
            genres,
        }
    }

    pub async fn create_film(&self, payload: NewFilm) -> ApiResult<Film> {
        let record = self
            .validated_record(
                payload.name,
                payload.description,
                payload.release_date,
                payload.duration,
                payload.mpa,
                payload.genres,
            )
            .await?;

        let film = self.films.create(&record).await?;
        info!("Created film id={} name={:?}", film.id, film.name);
        Ok(film)
    }

    pub async fn update_film(&self, payload: FilmUpdate) -> ApiResult<Film> {
        let record = self
            .validated_record(
                payload.name,
                payload.description,
                payload.release_date,
                payload.duration,
                payload.mpa,
                payload.genres,
            )
            .await?;

        self.films.require_exists(payload.id).await?;
        let film = self.films.update(payload.id, &record).await?;
        info!("Updated film id={}", film.id);
        Ok(film)
    }

    pub async fn get_film(&self, id: i64) -> ApiResult<Film> {
        self.films.find_by_id(id).await
    }

    pub async fn list_films(&self) -> ApiResult<Vec<Film>> {
        self.films.find_all().await
    }

    pub async fn add_like(&self, film_id: i64, user_id: i64) -> ApiResult<()> {
        self.films.require_exists(film_id).await?;
        self.users.require_exists(user_id).await?;

        self.films.add_like(film_id, user_id).await?;
        info!("User {} liked film {}", user_id, film_id);
        Ok(())
    }

    pub async fn remove_like(&self, film_id: i64, user_id: i64) -> ApiResult<()> {
        self.films.require_exists(film_id).await?;
        self.users.require_exists(user_id).await?;

        self.films.remove_like(film_id, user_id).await?;
        info!("User {} unliked film {}", user_id, film_id);
        Ok(())
    }

    pub async fn get_popular(&self, count: i64) -> ApiResult<Vec<Film>> {
        self.films.find_popular(count).await
    }

    /// Validate the payload fields, then resolve every MPA and genre
    /// reference before anything is written.
    async fn validated_record(
        &self,
        name: String,
        description: Option<String>,
        release_date: NaiveDate,
        duration: i64,
        mpa: Option<IdRef>,
        genres: Vec<IdRef>,
    ) -> ApiResult<FilmRecord> {
        validate_film(&name, description.as_deref(), release_date, duration)?;

        let mpa_id = mpa.map(|m| m.id);
        if let Some(id) = mpa_id {
            self.ratings.require_exists(id).await?;
        }

        let genre_ids: Vec<i64> = genres.iter().map(|g| g.id).collect();
        for id in &genre_ids {
            self.genres.require_exists(*id).await?;
        }

        Ok(FilmRecord {
            name,
            description,
            release_date,
            duration,
            mpa_id,
            genre_ids,
        })
    }
}

fn validate_film(
    name: &str,
    description: Option<&str>,
    release_date: NaiveDate,
    duration: i64,
) -> ApiResult<()> {
    if name.trim().is_empty() {
        warn!("Rejected film payload: blank name");
        return Err(ApiError::Validation("Film name must not be blank".to_string()));
    }
    if let Some(description) = description {
        if description.chars().count() > 200 {
            warn!("Rejected film payload: description over 200 chars");
            return Err(ApiError::Validation(
                "Description must be at most 200 characters".to_string(),
            ));
        }
    }
    if release_date < cinema_birthday() {
        warn!("Rejected film payload: release date {} precedes cinema birthday", release_date);
        return Err(ApiError::Validation(
            "Release date must not precede 1895-12-28".to_string(),
        ));
    }
    if duration <= 0 {
        warn!("Rejected film payload: non-positive duration {}", duration);
        return Err(ApiError::Validation(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, User};
    use crate::storage::{
        MemoryFilmStorage, MemoryGenreStorage, MemoryMpaStorage, MemoryUserStorage,
    };
    use crate::service::UserService;

    fn services() -> (FilmService, UserService) {
        let users: Arc<dyn UserStorage> = Arc::new(MemoryUserStorage::new());
        let films = FilmService::new(
            Arc::new(MemoryFilmStorage::new()),
            Arc::clone(&users),
            Arc::new(MemoryMpaStorage::new()),
            Arc::new(MemoryGenreStorage::new()),
        );
        (films, UserService::new(users))
    }

    fn new_film(name: &str) -> NewFilm {
        NewFilm {
            name: name.to_string(),
            description: Some("Desc".to_string()),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            duration: 120,
            mpa: None,
            genres: Vec::new(),
        }
    }

    async fn seeded_user(users: &UserService, login: &str) -> User {
        users
            .create_user(NewUser {
                email: format!("{login}@example.com"),
                login: login.to_string(),
                name: None,
                birthday: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn release_date_boundary_is_exact() {
        let (films, _) = services();

        let mut too_early = new_film("too early");
        too_early.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
        let err = films.create_film(too_early).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let mut on_the_day = new_film("on the day");
        on_the_day.release_date = NaiveDate::from_ymd_opt(1895, 12, 28).unwrap();
        assert!(films.create_film(on_the_day).await.is_ok());
    }

    #[tokio::test]
    async fn description_length_boundary_is_exact() {
        let (films, _) = services();

        let mut at_limit = new_film("at limit");
        at_limit.description = Some("x".repeat(200));
        assert!(films.create_film(at_limit).await.is_ok());

        let mut over_limit = new_film("over limit");
        over_limit.description = Some("x".repeat(201));
        let err = films.create_film(over_limit).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn non_positive_duration_is_rejected() {
        let (films, _) = services();

        let mut zero = new_film("zero");
        zero.duration = 0;
        let err = films.create_film(zero).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (films, _) = services();

        let mut blank = new_film("  ");
        blank.name = "  ".to_string();
        let err = films.create_film(blank).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_mpa_reference_is_not_found() {
        let (films, _) = services();

        let mut payload = new_film("bad mpa");
        payload.mpa = Some(IdRef { id: 99 });
        let err = films.create_film(payload).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_genre_reference_is_not_found() {
        let (films, _) = services();

        let mut payload = new_film("bad genre");
        payload.genres = vec![IdRef { id: 1 }, IdRef { id: 99 }];
        let err = films.create_film(payload).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn like_of_unknown_film_is_not_found() {
        let (films, users) = services();
        let alice = seeded_user(&users, "alice").await;

        let err = films.add_like(99, alice.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn like_by_unknown_user_is_not_found() {
        let (films, _) = services();
        let film = films.create_film(new_film("liked")).await.unwrap();

        let err = films.add_like(film.id, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn popular_reorders_after_like_removal() {
        let (films, users) = services();
        let alice = seeded_user(&users, "alice").await;
        let bob = seeded_user(&users, "bob").await;

        let f1 = films.create_film(new_film("one like")).await.unwrap();
        let f2 = films.create_film(new_film("two likes")).await.unwrap();

        films.add_like(f1.id, alice.id).await.unwrap();
        films.add_like(f2.id, alice.id).await.unwrap();
        films.add_like(f2.id, bob.id).await.unwrap();

        let top = films.get_popular(1).await.unwrap();
        assert_eq!(top.iter().map(|f| f.id).collect::<Vec<_>>(), vec![f2.id]);

        films.remove_like(f2.id, bob.id).await.unwrap();

        // Both films now hold one like; ascending id breaks the tie
        let popular = films.get_popular(2).await.unwrap();
        assert_eq!(
            popular.iter().map(|f| f.id).collect::<Vec<_>>(),
            vec![f1.id, f2.id]
        );
    }
}
