use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{PostgresClient, PostgresError};
use crate::models::{CategoryRequest, DisposalGuideline, RecyclingTip, WasteCategory};

/// A row from the `waste_categories` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self, children: &mut CategoryChildren) -> WasteCategory {
        WasteCategory {
            id: self.id,
            name: self.name,
            description: self.description,
            disposal_guidelines: children.guidelines.remove(&self.id).unwrap_or_default(),
            recycling_tips: children.tips.remove(&self.id).unwrap_or_default(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// Guidelines and tips grouped by their owning category
#[derive(Default)]
struct CategoryChildren {
    guidelines: HashMap<i64, Vec<DisposalGuideline>>,
    tips: HashMap<i64, Vec<RecyclingTip>>,
}

impl PostgresClient {
    pub async fn list_categories(&self) -> Result<Vec<WasteCategory>, PostgresError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at, updated_at \
             FROM waste_categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut children = self.load_children(None).await?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_category(&mut children))
            .collect())
    }

    pub async fn get_category(&self, id: i64) -> Result<WasteCategory, PostgresError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at, updated_at \
             FROM waste_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| category_not_found(id))?;

        let mut children = self.load_children(Some(id)).await?;
        Ok(row.into_category(&mut children))
    }

    /// Look a category up by name, ignoring case
    pub async fn find_category_by_name(&self, name: &str) -> Result<WasteCategory, PostgresError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at, updated_at \
             FROM waste_categories WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("Category not found with name: {}", name)))?;

        let mut children = self.load_children(Some(row.id)).await?;
        Ok(row.into_category(&mut children))
    }

    pub async fn create_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<WasteCategory, PostgresError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO waste_categories (name, description) VALUES ($1, $2) \
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(request.name.trim())
        .bind(request.description.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            PostgresError::conflict_on_unique(e, || {
                format!("Category already exists with name: {}", request.name.trim())
            })
        })?;

        tracing::info!("Created waste category {} ({})", row.id, row.name);
        Ok(row.into_category(&mut CategoryChildren::default()))
    }

    pub async fn update_category(
        &self,
        id: i64,
        request: &CategoryRequest,
    ) -> Result<WasteCategory, PostgresError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE waste_categories SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(request.description.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            PostgresError::conflict_on_unique(e, || {
                format!("Category already exists with name: {}", request.name.trim())
            })
        })?
        .ok_or_else(|| category_not_found(id))?;

        let mut children = self.load_children(Some(id)).await?;
        Ok(row.into_category(&mut children))
    }

    /// Delete a category; its guidelines and tips go with it
    pub async fn delete_category(&self, id: i64) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM waste_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        tracing::info!("Deleted waste category {}", id);
        Ok(())
    }

    pub async fn count_categories(&self) -> Result<i64, PostgresError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM waste_categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Fail with `NotFound` unless the category exists
    pub(super) async fn require_category(&self, id: i64) -> Result<(), PostgresError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM waste_categories WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            Ok(())
        } else {
            Err(category_not_found(id))
        }
    }

    async fn load_children(&self, category_id: Option<i64>) -> Result<CategoryChildren, PostgresError> {
        let (guidelines, tips) = match category_id {
            Some(id) => (
                self.guidelines_for_category(id).await?,
                self.tips_for_category(id).await?,
            ),
            None => (self.list_guidelines().await?, self.list_tips().await?),
        };

        let mut children = CategoryChildren::default();
        for guideline in guidelines {
            if let Some(owner) = guideline.category_id {
                children.guidelines.entry(owner).or_default().push(guideline);
            }
        }
        for tip in tips {
            if let Some(owner) = tip.category_id {
                children.tips.entry(owner).or_default().push(tip);
            }
        }
        Ok(children)
    }
}

fn category_not_found(id: i64) -> PostgresError {
    PostgresError::NotFound(format!("Category not found with id: {}", id))
}
