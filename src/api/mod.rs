/// API routes and handlers
pub mod films;
pub mod lookup;
pub mod users;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(users::routes())
        .merge(films::routes())
        .merge(lookup::routes())
}
