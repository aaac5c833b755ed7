//! User storage model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Role, User as SharedUser};
use surrealdb::RecordId;

/// User record — the only shape that carries the password hash.
/// Conversion into the API model drops it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for SharedUser {
    fn from(u: User) -> Self {
        SharedUser {
            id: u.id.map(|id| id.to_string()).unwrap_or_default(),
            username: u.username,
            firstname: u.firstname,
            lastname: u.lastname,
            email: u.email,
            phone: u.phone,
            role: u.role,
            gender: u.gender,
            date_of_birth: u.date_of_birth,
            address: u.address,
            image: u.image,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
