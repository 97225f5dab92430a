use sqlx::types::Json;

use super::{PostgresClient, PostgresError};
use crate::models::{DifficultyLevel, RecyclingTip, TipRequest};

/// A row from the `recycling_tips` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct TipRow {
    id: i64,
    category_id: Option<i64>,
    title: String,
    steps: Json<Vec<String>>,
    difficulty: DifficultyLevel,
    environmental_impact: Option<String>,
    time_required: String,
    required_materials: Option<String>,
}

impl From<TipRow> for RecyclingTip {
    fn from(row: TipRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            title: row.title,
            steps: row.steps.0,
            difficulty: row.difficulty,
            environmental_impact: row.environmental_impact,
            time_required: row.time_required,
            required_materials: row.required_materials,
        }
    }
}

impl PostgresClient {
    pub async fn list_tips(&self) -> Result<Vec<RecyclingTip>, PostgresError> {
        let rows = sqlx::query_as::<_, TipRow>(
            "SELECT id, category_id, title, steps, difficulty, environmental_impact, \
                    time_required, required_materials \
             FROM recycling_tips ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn tips_for_category(&self, category_id: i64) -> Result<Vec<RecyclingTip>, PostgresError> {
        let rows = sqlx::query_as::<_, TipRow>(
            "SELECT id, category_id, title, steps, difficulty, environmental_impact, \
                    time_required, required_materials \
             FROM recycling_tips WHERE category_id = $1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_tip(&self, id: i64) -> Result<RecyclingTip, PostgresError> {
        sqlx::query_as::<_, TipRow>(
            "SELECT id, category_id, title, steps, difficulty, environmental_impact, \
                    time_required, required_materials \
             FROM recycling_tips WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Into::into)
        .ok_or_else(|| tip_not_found(id))
    }

    async fn tip_title_exists(&self, title: &str) -> Result<bool, PostgresError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM recycling_tips WHERE title = $1)",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create_tip(&self, request: &TipRequest) -> Result<RecyclingTip, PostgresError> {
        if self.tip_title_exists(&request.title).await? {
            return Err(PostgresError::Conflict(duplicate_title(&request.title)));
        }
        if let Some(category_id) = request.category_id {
            self.require_category(category_id).await?;
        }

        let row = sqlx::query_as::<_, TipRow>(
            "INSERT INTO recycling_tips \
                 (title, steps, difficulty, environmental_impact, time_required, \
                  required_materials, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, category_id, title, steps, difficulty, environmental_impact, \
                       time_required, required_materials",
        )
        .bind(&request.title)
        .bind(Json(&request.steps))
        .bind(request.difficulty)
        .bind(&request.environmental_impact)
        .bind(&request.time_required)
        .bind(&request.required_materials)
        .bind(request.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostgresError::conflict_on_unique(e, || duplicate_title(&request.title)))?;

        tracing::info!("Created recycling tip {} ({})", row.id, row.title);
        Ok(row.into())
    }

    /// Replace a tip's content; the category only changes when one is given
    pub async fn update_tip(&self, id: i64, request: &TipRequest) -> Result<RecyclingTip, PostgresError> {
        let existing = self.get_tip(id).await?;

        if existing.title != request.title && self.tip_title_exists(&request.title).await? {
            return Err(PostgresError::Conflict(duplicate_title(&request.title)));
        }
        if let Some(category_id) = request.category_id {
            self.require_category(category_id).await?;
        }

        let row = sqlx::query_as::<_, TipRow>(
            "UPDATE recycling_tips \
             SET title = $2, steps = $3, difficulty = $4, environmental_impact = $5, \
                 time_required = $6, required_materials = $7, \
                 category_id = COALESCE($8, category_id), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, category_id, title, steps, difficulty, environmental_impact, \
                       time_required, required_materials",
        )
        .bind(id)
        .bind(&request.title)
        .bind(Json(&request.steps))
        .bind(request.difficulty)
        .bind(&request.environmental_impact)
        .bind(&request.time_required)
        .bind(&request.required_materials)
        .bind(request.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostgresError::conflict_on_unique(e, || duplicate_title(&request.title)))?
        .ok_or_else(|| tip_not_found(id))?;

        Ok(row.into())
    }

    pub async fn assign_tip(&self, id: i64, category_id: i64) -> Result<RecyclingTip, PostgresError> {
        let existing = self.get_tip(id).await?;
        if existing.category_id == Some(category_id) {
            return Err(PostgresError::IllegalOperation(
                "Recycling tip is already assigned to this category".to_string(),
            ));
        }
        self.require_category(category_id).await?;

        self.set_tip_category(id, Some(category_id)).await
    }

    pub async fn unassign_tip(&self, id: i64) -> Result<RecyclingTip, PostgresError> {
        self.set_tip_category(id, None).await
    }

    async fn set_tip_category(
        &self,
        id: i64,
        category_id: Option<i64>,
    ) -> Result<RecyclingTip, PostgresError> {
        sqlx::query_as::<_, TipRow>(
            "UPDATE recycling_tips SET category_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, category_id, title, steps, difficulty, environmental_impact, \
                       time_required, required_materials",
        )
        .bind(id)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Into::into)
        .ok_or_else(|| tip_not_found(id))
    }

    pub async fn delete_tip(&self, id: i64) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM recycling_tips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(tip_not_found(id));
        }
        Ok(())
    }
}

fn tip_not_found(id: i64) -> PostgresError {
    PostgresError::NotFound(format!("Recycling tip not found with id: {}", id))
}

fn duplicate_title(title: &str) -> String {
    format!("Recycling tip with title already exists: {}", title)
}
