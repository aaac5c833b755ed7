//! Category storage model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Category as SharedCategory;
use surrealdb::RecordId;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for SharedCategory {
    fn from(c: Category) -> Self {
        SharedCategory {
            id: c.id.map(|id| id.to_string()).unwrap_or_default(),
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
