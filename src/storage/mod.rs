/// Storage layer for Cinetrack
///
/// Each entity gets a narrow async trait so the services stay agnostic
/// of the backend: the SQLite implementations are the production path,
/// the in-memory implementations back the service unit tests.
pub mod film_db;
pub mod lookup_db;
pub mod memory;
pub mod user_db;

pub use film_db::FilmDbStorage;
pub use lookup_db::{GenreDbStorage, MpaDbStorage};
pub use memory::{MemoryFilmStorage, MemoryGenreStorage, MemoryMpaStorage, MemoryUserStorage};
pub use user_db::UserDbStorage;

use crate::error::ApiResult;
use crate::models::{Film, FilmRecord, Genre, Mpa, User};
use async_trait::async_trait;

/// User rows plus the directed friendship edges hanging off them
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Persist a new user; the id on the argument is ignored and the
    /// stored record with its generated id is returned.
    async fn create(&self, user: User) -> ApiResult<User>;

    /// Full overwrite of an existing user; NotFound if the id is absent.
    async fn update(&self, user: User) -> ApiResult<User>;

    async fn find_by_id(&self, id: i64) -> ApiResult<User>;

    /// All users ordered by ascending id
    async fn find_all(&self) -> ApiResult<Vec<User>>;

    /// Idempotent upsert of the directed edge user -> friend
    async fn add_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()>;

    /// Idempotent delete of the directed edge user -> friend
    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()>;

    /// Friend-edge targets of a user, ordered by ascending id
    async fn find_friends(&self, user_id: i64) -> ApiResult<Vec<User>>;

    /// Intersection of two users' friend sets, ordered by ascending id
    async fn find_common_friends(&self, user_id: i64, other_id: i64) -> ApiResult<Vec<User>>;

    /// Integrity guard: resolve the id or fail with NotFound
    async fn require_exists(&self, id: i64) -> ApiResult<()> {
        self.find_by_id(id).await.map(|_| ())
    }
}

/// Film rows, their genre assignments, and the like edges
#[async_trait]
pub trait FilmStorage: Send + Sync {
    /// Persist a new film plus its genre assignments, returning the
    /// stored record with resolved MPA rating and genre names.
    async fn create(&self, film: &FilmRecord) -> ApiResult<Film>;

    /// Full overwrite of an existing film, replacing the whole genre
    /// assignment set; NotFound if the id is absent.
    async fn update(&self, id: i64, film: &FilmRecord) -> ApiResult<Film>;

    async fn find_by_id(&self, id: i64) -> ApiResult<Film>;

    /// All films ordered by ascending id
    async fn find_all(&self) -> ApiResult<Vec<Film>>;

    /// Idempotent upsert of the (film, user) like edge
    async fn add_like(&self, film_id: i64, user_id: i64) -> ApiResult<()>;

    /// Idempotent delete of the (film, user) like edge
    async fn remove_like(&self, film_id: i64, user_id: i64) -> ApiResult<()>;

    /// Films ranked by descending like count, ties broken by ascending
    /// film id, truncated to `count`. Zero-like films are included.
    /// A non-positive count yields an empty list.
    async fn find_popular(&self, count: i64) -> ApiResult<Vec<Film>>;

    /// Integrity guard: resolve the id or fail with NotFound
    async fn require_exists(&self, id: i64) -> ApiResult<()> {
        self.find_by_id(id).await.map(|_| ())
    }
}

/// Read-only MPA rating lookup
#[async_trait]
pub trait MpaStorage: Send + Sync {
    /// All ratings ordered by ascending id
    async fn find_all(&self) -> ApiResult<Vec<Mpa>>;

    async fn find_by_id(&self, id: i64) -> ApiResult<Mpa>;

    async fn require_exists(&self, id: i64) -> ApiResult<()> {
        self.find_by_id(id).await.map(|_| ())
    }
}

/// Read-only genre lookup
#[async_trait]
pub trait GenreStorage: Send + Sync {
    /// All genres ordered by ascending id
    async fn find_all(&self) -> ApiResult<Vec<Genre>>;

    async fn find_by_id(&self, id: i64) -> ApiResult<Genre>;

    async fn require_exists(&self, id: i64) -> ApiResult<()> {
        self.find_by_id(id).await.map(|_| ())
    }
}
