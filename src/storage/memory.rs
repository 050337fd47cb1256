/// In-memory storage backend
///
/// Implements the same storage traits as the SQLite backend, with the
/// tables owned behind a single lock and ids assigned by an internal
/// counter. Backs the service unit tests; also usable standalone when
/// no database is wanted.
use crate::error::{ApiError, ApiResult};
use crate::models::{Film, FilmRecord, Genre, Mpa, User};
use crate::storage::{FilmStorage, GenreStorage, MpaStorage, UserStorage};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::RwLock;

/// The lookup rows the SQLite migration seeds
pub fn seed_ratings() -> Vec<Mpa> {
    ["G", "PG", "PG-13", "R", "NC-17"]
        .iter()
        .enumerate()
        .map(|(i, name)| Mpa {
            id: i as i64 + 1,
            name: (*name).to_string(),
        })
        .collect()
}

/// The genre rows the SQLite migration seeds
pub fn seed_genres() -> Vec<Genre> {
    ["Comedy", "Drama", "Cartoon", "Thriller", "Documentary", "Action"]
        .iter()
        .enumerate()
        .map(|(i, name)| Genre {
            id: i as i64 + 1,
            name: (*name).to_string(),
        })
        .collect()
}

#[derive(Default)]
struct UserTable {
    next_id: i64,
    users: BTreeMap<i64, User>,
    // user id -> friend-edge targets (directed)
    friends: HashMap<i64, BTreeSet<i64>>,
}

/// In-memory user storage
#[derive(Default)]
pub struct MemoryUserStorage {
    inner: RwLock<UserTable>,
}

impl MemoryUserStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn create(&self, user: User) -> ApiResult<User> {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let user = User {
            id: table.next_id,
            ..user
        };
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> ApiResult<User> {
        let mut table = self.inner.write().await;
        if !table.users.contains_key(&user.id) {
            return Err(ApiError::not_found("user", user.id));
        }
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<User> {
        let table = self.inner.read().await;
        table
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    async fn find_all(&self) -> ApiResult<Vec<User>> {
        let table = self.inner.read().await;
        Ok(table.users.values().cloned().collect())
    }

    async fn add_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()> {
        let mut table = self.inner.write().await;
        table.friends.entry(user_id).or_default().insert(friend_id);
        Ok(())
    }

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> ApiResult<()> {
        let mut table = self.inner.write().await;
        if let Some(targets) = table.friends.get_mut(&user_id) {
            targets.remove(&friend_id);
        }
        Ok(())
    }

    async fn find_friends(&self, user_id: i64) -> ApiResult<Vec<User>> {
        let table = self.inner.read().await;
        let targets = table.friends.get(&user_id).cloned().unwrap_or_default();
        Ok(targets
            .iter()
            .filter_map(|id| table.users.get(id).cloned())
            .collect())
    }

    async fn find_common_friends(&self, user_id: i64, other_id: i64) -> ApiResult<Vec<User>> {
        let table = self.inner.read().await;
        let empty = BTreeSet::new();
        let mine = table.friends.get(&user_id).unwrap_or(&empty);
        let theirs = table.friends.get(&other_id).unwrap_or(&empty);
        Ok(mine
            .intersection(theirs)
            .filter_map(|id| table.users.get(id).cloned())
            .collect())
    }
}

struct FilmTable {
    next_id: i64,
    films: BTreeMap<i64, Film>,
    // film id -> users who liked it
    likes: HashMap<i64, BTreeSet<i64>>,
    ratings: BTreeMap<i64, Mpa>,
    genres: BTreeMap<i64, Genre>,
}

/// In-memory film storage, seeded with the standard lookup rows so it
/// can resolve MPA and genre references the way the SQLite joins do
pub struct MemoryFilmStorage {
    inner: RwLock<FilmTable>,
}

impl Default for MemoryFilmStorage {
    fn default() -> Self {
        Self {
            inner: RwLock::new(FilmTable {
                next_id: 0,
                films: BTreeMap::new(),
                likes: HashMap::new(),
                ratings: seed_ratings().into_iter().map(|m| (m.id, m)).collect(),
                genres: seed_genres().into_iter().map(|g| (g.id, g)).collect(),
            }),
        }
    }
}

impl MemoryFilmStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilmTable {
    fn resolve(&self, id: i64, record: &FilmRecord) -> Film {
        // Genre set collapses duplicates and comes back ordered by id
        let genre_ids: BTreeSet<i64> = record.genre_ids.iter().copied().collect();
        Film {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            release_date: record.release_date,
            duration: record.duration,
            mpa: record.mpa_id.and_then(|m| self.ratings.get(&m).cloned()),
            genres: genre_ids
                .iter()
                .filter_map(|g| self.genres.get(g).cloned())
                .collect(),
        }
    }
}

#[async_trait]
impl FilmStorage for MemoryFilmStorage {
    async fn create(&self, film: &FilmRecord) -> ApiResult<Film> {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let id = table.next_id;
        let film = table.resolve(id, film);
        table.films.insert(id, film.clone());
        Ok(film)
    }

    async fn update(&self, id: i64, film: &FilmRecord) -> ApiResult<Film> {
        let mut table = self.inner.write().await;
        if !table.films.contains_key(&id) {
            return Err(ApiError::not_found("film", id));
        }
        let film = table.resolve(id, film);
        table.films.insert(id, film.clone());
        Ok(film)
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<Film> {
        let table = self.inner.read().await;
        table
            .films
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("film", id))
    }

    async fn find_all(&self) -> ApiResult<Vec<Film>> {
        let table = self.inner.read().await;
        Ok(table.films.values().cloned().collect())
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> ApiResult<()> {
        let mut table = self.inner.write().await;
        table.likes.entry(film_id).or_default().insert(user_id);
        Ok(())
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> ApiResult<()> {
        let mut table = self.inner.write().await;
        if let Some(users) = table.likes.get_mut(&film_id) {
            users.remove(&user_id);
        }
        Ok(())
    }

    async fn find_popular(&self, count: i64) -> ApiResult<Vec<Film>> {
        if count <= 0 {
            return Ok(Vec::new());
        }

        let table = self.inner.read().await;
        let mut ranked: Vec<(usize, &Film)> = table
            .films
            .values()
            .map(|f| (table.likes.get(&f.id).map_or(0, BTreeSet::len), f))
            .collect();

        // Descending like count, ascending film id on ties
        ranked.sort_by(|(la, fa), (lb, fb)| lb.cmp(la).then(fa.id.cmp(&fb.id)));

        Ok(ranked
            .into_iter()
            .take(count as usize)
            .map(|(_, f)| f.clone())
            .collect())
    }
}

/// In-memory MPA lookup seeded with the standard ratings
pub struct MemoryMpaStorage {
    ratings: BTreeMap<i64, Mpa>,
}

impl Default for MemoryMpaStorage {
    fn default() -> Self {
        Self {
            ratings: seed_ratings().into_iter().map(|m| (m.id, m)).collect(),
        }
    }
}

impl MemoryMpaStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MpaStorage for MemoryMpaStorage {
    async fn find_all(&self) -> ApiResult<Vec<Mpa>> {
        Ok(self.ratings.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<Mpa> {
        self.ratings
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("mpa", id))
    }
}

/// In-memory genre lookup seeded with the standard genres
pub struct MemoryGenreStorage {
    genres: BTreeMap<i64, Genre>,
}

impl Default for MemoryGenreStorage {
    fn default() -> Self {
        Self {
            genres: seed_genres().into_iter().map(|g| (g.id, g)).collect(),
        }
    }
}

impl MemoryGenreStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenreStorage for MemoryGenreStorage {
    async fn find_all(&self) -> ApiResult<Vec<Genre>> {
        Ok(self.genres.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ApiResult<Genre> {
        self.genres
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("genre", id))
    }
}
