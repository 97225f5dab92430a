use super::{PostgresClient, PostgresError};
use crate::models::{DisposalGuideline, GuidelineRequest};

/// A row from the `disposal_guidelines` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct GuidelineRow {
    id: i64,
    category_id: Option<i64>,
    title: String,
    instructions: String,
}

impl From<GuidelineRow> for DisposalGuideline {
    fn from(row: GuidelineRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            title: row.title,
            instructions: row.instructions,
        }
    }
}

impl PostgresClient {
    pub async fn list_guidelines(&self) -> Result<Vec<DisposalGuideline>, PostgresError> {
        let rows = sqlx::query_as::<_, GuidelineRow>(
            "SELECT id, category_id, title, instructions FROM disposal_guidelines ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn guidelines_for_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<DisposalGuideline>, PostgresError> {
        let rows = sqlx::query_as::<_, GuidelineRow>(
            "SELECT id, category_id, title, instructions FROM disposal_guidelines \
             WHERE category_id = $1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_guideline(&self, id: i64) -> Result<DisposalGuideline, PostgresError> {
        sqlx::query_as::<_, GuidelineRow>(
            "SELECT id, category_id, title, instructions FROM disposal_guidelines WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Into::into)
        .ok_or_else(|| guideline_not_found(id))
    }

    async fn guideline_title_exists(&self, title: &str) -> Result<bool, PostgresError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM disposal_guidelines WHERE title = $1)",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a guideline, optionally attached to an existing category
    pub async fn create_guideline(
        &self,
        request: &GuidelineRequest,
    ) -> Result<DisposalGuideline, PostgresError> {
        if self.guideline_title_exists(&request.title).await? {
            return Err(PostgresError::Conflict(duplicate_title(&request.title)));
        }
        if let Some(category_id) = request.category_id {
            self.require_category(category_id).await?;
        }

        let row = sqlx::query_as::<_, GuidelineRow>(
            "INSERT INTO disposal_guidelines (title, instructions, category_id) \
             VALUES ($1, $2, $3) \
             RETURNING id, category_id, title, instructions",
        )
        .bind(&request.title)
        .bind(&request.instructions)
        .bind(request.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostgresError::conflict_on_unique(e, || duplicate_title(&request.title)))?;

        tracing::info!("Created disposal guideline {} ({})", row.id, row.title);
        Ok(row.into())
    }

    /// Update title and instructions; the category only changes when one is given
    pub async fn update_guideline(
        &self,
        id: i64,
        request: &GuidelineRequest,
    ) -> Result<DisposalGuideline, PostgresError> {
        let existing = self.get_guideline(id).await?;

        if existing.title != request.title && self.guideline_title_exists(&request.title).await? {
            return Err(PostgresError::Conflict(duplicate_title(&request.title)));
        }
        if let Some(category_id) = request.category_id {
            self.require_category(category_id).await?;
        }

        let row = sqlx::query_as::<_, GuidelineRow>(
            "UPDATE disposal_guidelines \
             SET title = $2, instructions = $3, category_id = COALESCE($4, category_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, category_id, title, instructions",
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.instructions)
        .bind(request.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostgresError::conflict_on_unique(e, || duplicate_title(&request.title)))?
        .ok_or_else(|| guideline_not_found(id))?;

        Ok(row.into())
    }

    /// Attach a guideline to a category
    ///
    /// Fails with `IllegalOperation` when it already belongs to that category.
    pub async fn assign_guideline(
        &self,
        id: i64,
        category_id: i64,
    ) -> Result<DisposalGuideline, PostgresError> {
        let existing = self.get_guideline(id).await?;
        if existing.category_id == Some(category_id) {
            return Err(PostgresError::IllegalOperation(
                "Guideline is already assigned to this category".to_string(),
            ));
        }
        self.require_category(category_id).await?;

        self.set_guideline_category(id, Some(category_id)).await
    }

    /// Detach a guideline from whatever category holds it
    pub async fn unassign_guideline(&self, id: i64) -> Result<DisposalGuideline, PostgresError> {
        self.set_guideline_category(id, None).await
    }

    async fn set_guideline_category(
        &self,
        id: i64,
        category_id: Option<i64>,
    ) -> Result<DisposalGuideline, PostgresError> {
        let row = sqlx::query_as::<_, GuidelineRow>(
            "UPDATE disposal_guidelines SET category_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, category_id, title, instructions",
        )
        .bind(id)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| guideline_not_found(id))?;

        tracing::debug!("Guideline {} now in category {:?}", id, category_id);
        Ok(row.into())
    }

    pub async fn delete_guideline(&self, id: i64) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM disposal_guidelines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(guideline_not_found(id));
        }
        Ok(())
    }
}

fn guideline_not_found(id: i64) -> PostgresError {
    PostgresError::NotFound(format!("Guideline not found with id: {}", id))
}

fn duplicate_title(title: &str) -> String {
    format!("Guideline with title already exists: {}", title)
}
