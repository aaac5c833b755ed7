//! Category Repository

use chrono::Utc;
use shared::models::{CategoryCreate, CategoryUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Category;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(category)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let found: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE name = $name")
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(found.into_iter().next())
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let found: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(found.into_iter().next())
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let now = Utc::now();
        let category = Category {
            id: None,
            name: data.name,
            slug: data.slug,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let mut category = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id}")))?;

        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(slug) = data.slug {
            category.slug = slug;
        }
        category.updated_at = Utc::now();

        let updated: Option<Category> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(category)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Category> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
