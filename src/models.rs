/// Domain records and wire payloads
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// MPA rating lookup row
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Mpa {
    pub id: i64,
    pub name: String,
}

/// Genre lookup row
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// User record
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// Film record with resolved MPA rating and genres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    pub mpa: Option<Mpa>,
    pub genres: Vec<Genre>,
}

/// Reference to a lookup row by id, as sent on film payloads
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// Payload for creating a user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Payload for updating a user (full overwrite, id in body)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: i64,
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Payload for creating a film
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    #[serde(default)]
    pub mpa: Option<IdRef>,
    #[serde(default)]
    pub genres: Vec<IdRef>,
}

/// Payload for updating a film (full overwrite, id in body)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmUpdate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    #[serde(default)]
    pub mpa: Option<IdRef>,
    #[serde(default)]
    pub genres: Vec<IdRef>,
}

/// Validated film fields handed to storage. Genre ids are already
/// resolved against the genres table; the junction rows collapse
/// duplicates on their composite key.
#[derive(Debug, Clone)]
pub struct FilmRecord {
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i64,
    pub mpa_id: Option<i64>,
    pub genre_ids: Vec<i64>,
}
