use chrono::{DateTime, Utc};

use super::{PostgresClient, PostgresError};
use crate::models::{Location, MaterialAcceptance, MaterialKey};

/// Columns a location listing may be ordered by
pub const SORTABLE_COLUMNS: [&str; 6] = ["id", "name", "city", "municipality", "type", "created_at"];

const LOCATION_COLUMNS: &str = "id, latitude, longitude, name, municipality, city, \"type\", \
     operation, website, other, group_name, \
     accepts_plastic, accepts_paper, accepts_cardboard, accepts_cans, accepts_cartons, \
     accepts_ewaste, accepts_metal, accepts_motor_oil, \
     is_dropoff_site, is_paid, created_at, updated_at";

/// A row from the `recycling_locations` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct LocationRow {
    id: i64,
    latitude: f64,
    longitude: f64,
    name: String,
    municipality: Option<String>,
    city: Option<String>,
    #[sqlx(rename = "type")]
    location_type: Option<String>,
    operation: Option<String>,
    website: Option<String>,
    other: Option<String>,
    group_name: Option<String>,
    accepts_plastic: bool,
    accepts_paper: bool,
    accepts_cardboard: bool,
    accepts_cans: bool,
    accepts_cartons: bool,
    accepts_ewaste: bool,
    accepts_metal: bool,
    accepts_motor_oil: bool,
    is_dropoff_site: bool,
    is_paid: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        let accepted_materials = MaterialAcceptance::new()
            .with(MaterialKey::Plastic, row.accepts_plastic)
            .with(MaterialKey::Paper, row.accepts_paper)
            .with(MaterialKey::Cardboard, row.accepts_cardboard)
            .with(MaterialKey::Cans, row.accepts_cans)
            .with(MaterialKey::Cartons, row.accepts_cartons)
            .with(MaterialKey::Ewaste, row.accepts_ewaste)
            .with(MaterialKey::Metal, row.accepts_metal)
            .with(MaterialKey::MotorOil, row.accepts_motor_oil);

        Self {
            id: row.id,
            latitude: row.latitude,
            longitude: row.longitude,
            name: row.name,
            municipality: row.municipality,
            city: row.city,
            location_type: row.location_type,
            operation: row.operation,
            website: row.website,
            other: row.other,
            group_name: row.group_name,
            is_dropoff_site: row.is_dropoff_site,
            is_paid: row.is_paid,
            accepted_materials,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Validated ORDER BY clause for location listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationSort {
    column: &'static str,
    direction: SortDirection,
}

impl LocationSort {
    /// Parse `column` or `column,asc|desc`
    ///
    /// Returns `None` for anything outside [`SORTABLE_COLUMNS`].
    pub fn parse(sort: &str) -> Option<Self> {
        let mut parts = sort.splitn(2, ',');
        let requested = parts.next()?.trim();
        let column = SORTABLE_COLUMNS
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(requested))?;

        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(_) => return None,
        };

        Some(Self { column, direction })
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    fn order_by(&self) -> String {
        let direction = match self.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        format!("\"{}\" {}, id ASC", self.column, direction)
    }
}

impl Default for LocationSort {
    fn default() -> Self {
        Self {
            column: "name",
            direction: SortDirection::Asc,
        }
    }
}

impl PostgresClient {
    /// Every stored location, ordered by id
    pub async fn all_locations(&self) -> Result<Vec<Location>, PostgresError> {
        let query = format!("SELECT {} FROM recycling_locations ORDER BY id", LOCATION_COLUMNS);
        let rows = sqlx::query_as::<_, LocationRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} recycling locations", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_location(&self, id: i64) -> Result<Location, PostgresError> {
        let query = format!("SELECT {} FROM recycling_locations WHERE id = $1", LOCATION_COLUMNS);
        sqlx::query_as::<_, LocationRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| PostgresError::NotFound(format!("Location not found with id: {}", id)))
    }

    /// One page of locations plus the total row count
    pub async fn list_locations_page(
        &self,
        page: u32,
        size: u32,
        sort: LocationSort,
    ) -> Result<(Vec<Location>, u64), PostgresError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recycling_locations")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM recycling_locations ORDER BY {} LIMIT $1 OFFSET $2",
            LOCATION_COLUMNS,
            sort.order_by()
        );
        let offset = i64::from(page) * i64::from(size);
        let rows = sqlx::query_as::<_, LocationRow>(&query)
            .bind(i64::from(size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_defaults_to_ascending() {
        let sort = LocationSort::parse("city").unwrap();
        assert_eq!(sort.column(), "city");
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(sort.order_by(), "\"city\" ASC, id ASC");
    }

    #[test]
    fn test_sort_with_direction() {
        let sort = LocationSort::parse("created_at,DESC").unwrap();
        assert_eq!(sort.column(), "created_at");
        assert_eq!(sort.direction(), SortDirection::Desc);
    }

    #[test]
    fn test_sort_rejects_unknown_columns() {
        assert!(LocationSort::parse("latitude").is_none());
        assert!(LocationSort::parse("name; DROP TABLE recycling_locations").is_none());
        assert!(LocationSort::parse("name,sideways").is_none());
    }

    #[test]
    fn test_default_sort_is_name() {
        assert_eq!(LocationSort::default(), LocationSort::parse("name").unwrap());
    }
}
