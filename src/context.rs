/// Application context and dependency wiring
use crate::{
    config::ServerConfig,
    db,
    error::ApiResult,
    service::{FilmService, UserService},
    storage::{
        FilmDbStorage, GenreDbStorage, GenreStorage, MpaDbStorage, MpaStorage, UserDbStorage,
        UserStorage,
    },
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub users: Arc<UserService>,
    pub films: Arc<FilmService>,
    pub ratings: Arc<dyn MpaStorage>,
    pub genres: Arc<dyn GenreStorage>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> ApiResult<Self> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.storage.data_directory).await?;

        let pool = db::create_pool(&config.storage.database, db::DatabaseOptions::default()).await?;
        db::run_migrations(&pool).await?;
        db::test_connection(&pool).await?;

        Ok(Self::from_pool(config, pool))
    }

    /// Wire services onto an already-migrated pool; also used by the
    /// router tests with an in-memory database.
    pub fn from_pool(config: ServerConfig, db: SqlitePool) -> Self {
        let user_storage: Arc<dyn UserStorage> = Arc::new(UserDbStorage::new(db.clone()));
        let ratings: Arc<dyn MpaStorage> = Arc::new(MpaDbStorage::new(db.clone()));
        let genres: Arc<dyn GenreStorage> = Arc::new(GenreDbStorage::new(db.clone()));

        let films = Arc::new(FilmService::new(
            Arc::new(FilmDbStorage::new(db.clone())),
            Arc::clone(&user_storage),
            Arc::clone(&ratings),
            Arc::clone(&genres),
        ));
        let users = Arc::new(UserService::new(user_storage));

        Self {
            config: Arc::new(config),
            db,
            users,
            films,
            ratings,
            genres,
        }
    }
}
