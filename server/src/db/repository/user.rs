//! User Repository

use chrono::Utc;
use shared::models::UserUpdate;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::User;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let found: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username")
            .bind(("username", username.to_string()))
            .await?
            .take(0)?;
        Ok(found.into_iter().next())
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let found: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(found.into_iter().next())
    }

    /// Login lookup: match either credential field
    pub async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<User>> {
        let found: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username OR email = $email")
            .bind(("username", username.unwrap_or_default().to_string()))
            .bind(("email", email.unwrap_or_default().to_string()))
            .await?
            .take(0)?;
        Ok(found.into_iter().next())
    }

    /// Insert a fully-built record (the handler hashes the password).
    pub async fn create(&self, user: User) -> RepoResult<User> {
        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let mut user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id}")))?;

        if let Some(username) = data.username {
            user.username = username;
        }
        if let Some(firstname) = data.firstname {
            user.firstname = firstname;
        }
        if let Some(lastname) = data.lastname {
            user.lastname = lastname;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(phone) = data.phone {
            user.phone = Some(phone);
        }
        if let Some(role) = data.role {
            user.role = role;
        }
        if let Some(gender) = data.gender {
            user.gender = Some(gender);
        }
        if let Some(date_of_birth) = data.date_of_birth {
            user.date_of_birth = Some(date_of_birth);
        }
        if let Some(address) = data.address {
            user.address = Some(address);
        }
        if let Some(image) = data.image {
            user.image = Some(image);
        }
        user.updated_at = Utc::now();

        let updated: Option<User> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(user)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<User> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
