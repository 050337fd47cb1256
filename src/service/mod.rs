/// Service layer: input validation, referential-integrity guards, and
/// delegation to the storage backends.
pub mod film;
pub mod user;

pub use film::FilmService;
pub use user::UserService;
