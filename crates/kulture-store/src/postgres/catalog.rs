use async_trait::async_trait;
use chrono::NaiveDate;
use kulture_core::error::Result;
use kulture_core::models::{
    Category, CategorySchema, Coordinate, CulturalRecord, DateRange, FestivalEvent, Region,
    RegionId,
};
use kulture_core::ports::CultureStore;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::{map_sqlx_error, PostgresStore};
use crate::fixture::StaticDataset;

/// Counts reported after a dataset import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub regions: usize,
    pub records: usize,
}

/// Build the per-category SELECT.
///
/// Columns a table lacks are selected as typed NULLs so every category
/// decodes through the same row shape. The region key is always bound.
pub fn category_select_sql(schema: &CategorySchema) -> String {
    let image = schema.image_column.unwrap_or("NULL::TEXT");
    let (latitude, longitude) = if schema.has_coordinates {
        ("latitude", "longitude")
    } else {
        ("NULL::DOUBLE PRECISION", "NULL::DOUBLE PRECISION")
    };
    let date = schema.date_column.unwrap_or("NULL::DATE");

    format!(
        "SELECT {title} AS title, {description} AS description, {image} AS image, \
         {latitude} AS latitude, {longitude} AS longitude, {date} AS observed_on \
         FROM {table} WHERE state_id = $1 ORDER BY id",
        title = schema.title_column,
        description = schema.description_column,
        table = schema.table,
    )
}

/// Build the per-category INSERT with one placeholder per present column
pub fn category_insert_sql(schema: &CategorySchema) -> String {
    let mut columns = vec!["state_id", schema.title_column, schema.description_column];
    if let Some(image) = schema.image_column {
        columns.push(image);
    }
    if schema.has_coordinates {
        columns.push("latitude");
        columns.push("longitude");
    }
    if let Some(date) = schema.date_column {
        columns.push(date);
    }

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn record_from_row(
    category: Category,
    row: &PgRow,
) -> std::result::Result<CulturalRecord, sqlx::Error> {
    let latitude: Option<f64> = row.try_get("latitude")?;
    let longitude: Option<f64> = row.try_get("longitude")?;

    Ok(CulturalRecord {
        category,
        title: row.try_get("title")?,
        description: row.try_get::<Option<String>, _>("description")?.unwrap_or_default(),
        image: row.try_get("image")?,
        coordinate: Coordinate::from_parts(latitude, longitude),
        date: row.try_get::<Option<NaiveDate>, _>("observed_on")?,
    })
}

fn region_from_row(row: &PgRow) -> std::result::Result<Region, sqlx::Error> {
    let anchor_lat: Option<f64> = row.try_get("anchor_lat")?;
    let anchor_lon: Option<f64> = row.try_get("anchor_lon")?;

    Ok(Region {
        id: RegionId(row.try_get("id")?),
        name: row.try_get("name")?,
        anchor: Coordinate::from_parts(anchor_lat, anchor_lon),
    })
}

impl PostgresStore {
    /// Import a dataset in a single transaction.
    ///
    /// Existing regions with the same key are replaced along with all of
    /// their records; nothing is written if any statement fails.
    pub async fn import_dataset(&self, dataset: &StaticDataset) -> Result<ImportSummary> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;
        let mut summary = ImportSummary::default();

        for static_region in &dataset.regions {
            let region = static_region.to_region();

            sqlx::query(
                r#"
                INSERT INTO states (id, name, anchor_lat, anchor_lon)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    anchor_lat = EXCLUDED.anchor_lat,
                    anchor_lon = EXCLUDED.anchor_lon
                "#,
            )
            .bind(region.id.as_str())
            .bind(&region.name)
            .bind(region.anchor.map(|a| a.lat()))
            .bind(region.anchor.map(|a| a.lon()))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            for category in Category::ALL {
                let schema = category.schema();

                let delete_sql = format!("DELETE FROM {} WHERE state_id = $1", schema.table);
                sqlx::query(&delete_sql)
                    .bind(region.id.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?;

                let insert_sql = category_insert_sql(&schema);
                for static_record in static_region.records.get(category) {
                    let record = static_record.to_record(category);

                    let mut query = sqlx::query(&insert_sql)
                        .bind(region.id.as_str())
                        .bind(record.title)
                        .bind(record.description);
                    if schema.image_column.is_some() {
                        query = query.bind(record.image);
                    }
                    if schema.has_coordinates {
                        query = query
                            .bind(record.coordinate.map(|c| c.lat()))
                            .bind(record.coordinate.map(|c| c.lon()));
                    }
                    if schema.date_column.is_some() {
                        query = query.bind(record.date);
                    }

                    query.execute(&mut *tx).await.map_err(map_sqlx_error)?;
                    summary.records += 1;
                }
            }

            summary.regions += 1;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::info!(
            regions = summary.regions,
            records = summary.records,
            "Imported dataset"
        );
        Ok(summary)
    }
}

#[async_trait]
impl CultureStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_regions(&self) -> Result<Vec<Region>> {
        let mut conn = self.connection().await?;

        let rows = sqlx::query("SELECT id, name, anchor_lat, anchor_lon FROM states")
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter()
            .map(region_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(map_sqlx_error)
    }

    async fn find_region(&self, name: &str) -> Result<Option<Region>> {
        let mut conn = self.connection().await?;

        let row = sqlx::query(
            "SELECT id, name, anchor_lat, anchor_lon FROM states WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name.trim())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(region_from_row).transpose().map_err(map_sqlx_error)
    }

    async fn fetch_category(
        &self,
        region: &RegionId,
        category: Category,
    ) -> Result<Vec<CulturalRecord>> {
        let sql = category_select_sql(&category.schema());
        let mut conn = self.connection().await?;

        let rows = sqlx::query(&sql)
            .bind(region.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        let records = rows
            .iter()
            .map(|row| record_from_row(category, row))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(map_sqlx_error)?;

        tracing::debug!(
            region = %region,
            category = %category,
            count = records.len(),
            "Fetched category"
        );
        Ok(records)
    }

    async fn list_festival_events(&self, range: &DateRange) -> Result<Vec<FestivalEvent>> {
        let mut conn = self.connection().await?;

        let rows = sqlx::query(
            r#"
            SELECT s.name AS region, f.name AS title, f.observed_on
            FROM festivals f
            JOIN states s ON s.id = f.state_id
            WHERE f.observed_on BETWEEN $1 AND $2
            ORDER BY f.observed_on, f.name
            "#,
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                Ok(FestivalEvent {
                    region: row.try_get("region")?,
                    title: row.try_get("title")?,
                    date: row.try_get("observed_on")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
            .map_err(map_sqlx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_for_heritage_reads_coordinates() {
        let sql = category_select_sql(&Category::Heritage.schema());
        assert!(sql.contains("FROM tourist_places"));
        assert!(sql.contains("latitude AS latitude"));
        assert!(sql.contains("NULL::DATE AS observed_on"));
        assert!(sql.contains("state_id = $1"));
    }

    #[test]
    fn test_select_for_scheme_fills_missing_columns() {
        let sql = category_select_sql(&Category::Scheme.schema());
        assert!(sql.starts_with("SELECT scheme_name AS title"));
        assert!(sql.contains("NULL::TEXT AS image"));
        assert!(sql.contains("NULL::DOUBLE PRECISION AS latitude"));
    }

    #[test]
    fn test_select_never_interpolates_region() {
        for category in Category::ALL {
            let sql = category_select_sql(&category.schema());
            assert_eq!(sql.matches('$').count(), 1, "{sql}");
        }
    }

    #[test]
    fn test_insert_placeholders_match_columns() {
        let sql = category_insert_sql(&Category::Festival.schema());
        assert_eq!(
            sql,
            "INSERT INTO festivals (state_id, name, description, url, latitude, longitude, observed_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)"
        );

        let sql = category_insert_sql(&Category::Scheme.schema());
        assert_eq!(
            sql,
            "INSERT INTO government_schemes (state_id, scheme_name, description) VALUES ($1, $2, $3)"
        );
    }
}
