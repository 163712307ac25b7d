use std::path::Path;

use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db;
use crate::error::{NotFoundError, ValidationError};
use crate::gpa;
use crate::models::{CourseRecord, GpaSnapshot};

/// Durable set of course records plus the last published GPA snapshot.
///
/// Every mutation validates, persists, then recomputes the snapshot from a
/// full reload before returning, so readers always see figures that reflect
/// a fully applied record set. Mutations take `&mut self`, which serializes
/// writers.
pub struct RecordStore {
    pool: SqlitePool,
    snapshot: GpaSnapshot,
}

impl RecordStore {
    /// Creates the schema if absent and hydrates the snapshot from whatever
    /// records are already on disk.
    pub async fn open(pool: SqlitePool) -> anyhow::Result<Self> {
        db::init_db(&pool).await?;
        let mut store = RecordStore {
            pool,
            snapshot: GpaSnapshot::default(),
        };
        store.recompute().await?;
        Ok(store)
    }

    /// The GPA figures as of the last successful mutation (or open).
    pub fn snapshot(&self) -> &GpaSnapshot {
        &self.snapshot
    }

    pub async fn records(&self) -> anyhow::Result<Vec<CourseRecord>> {
        db::fetch_records(&self.pool).await
    }

    /// Validates and persists a new course record, then republishes the
    /// snapshot. Returns the id assigned to the record.
    pub async fn add(
        &mut self,
        course: &str,
        credits: f64,
        grade: i64,
        year: &str,
    ) -> anyhow::Result<Uuid> {
        let record = validate(course, credits, grade, year)?;
        db::insert_record(&self.pool, &record).await?;
        self.recompute().await?;
        info!(course = %record.course, year = %record.year, "added course record");
        Ok(record.id)
    }

    /// Deletes a record. Removing an id that does not exist is a no-op:
    /// the miss is logged and the snapshot is still recomputed.
    pub async fn remove(&mut self, id: Uuid) -> anyhow::Result<()> {
        let affected = db::delete_record(&self.pool, id).await?;
        if affected == 0 {
            warn!("{}; treating remove as a no-op", NotFoundError(id));
        } else {
            info!(%id, "removed course record");
        }
        self.recompute().await?;
        Ok(())
    }

    /// Replaces a record with new values. The replacement is a remove
    /// followed by an add, so the returned id differs from the one passed
    /// in. All fields are re-validated before the old row is touched.
    pub async fn edit(
        &mut self,
        id: Uuid,
        course: &str,
        credits: f64,
        grade: i64,
        year: &str,
    ) -> anyhow::Result<Uuid> {
        let record = validate(course, credits, grade, year)?;
        let affected = db::delete_record(&self.pool, id).await?;
        if affected == 0 {
            warn!("{}; editing anyway", NotFoundError(id));
        }
        db::insert_record(&self.pool, &record).await?;
        self.recompute().await?;
        info!(course = %record.course, new_id = %record.id, "replaced course record");
        Ok(record.id)
    }

    /// Bulk-loads records from a CSV file with a `course,credits,grade,year`
    /// header. Every row is validated before the first insert, so a bad file
    /// leaves the store untouched. Returns the number of records inserted.
    pub async fn import_csv(&mut self, csv_path: &Path) -> anyhow::Result<usize> {
        #[derive(serde::Deserialize)]
        struct CsvRow {
            course: String,
            credits: f64,
            grade: i64,
            year: String,
        }

        let mut reader = csv::Reader::from_path(csv_path)?;
        let mut validated = Vec::new();

        for result in reader.deserialize::<CsvRow>() {
            let row = result?;
            validated.push(validate(&row.course, row.credits, row.grade, &row.year)?);
        }

        for record in &validated {
            db::insert_record(&self.pool, record).await?;
        }
        self.recompute().await?;

        info!(count = validated.len(), "imported course records from csv");
        Ok(validated.len())
    }

    async fn recompute(&mut self) -> anyhow::Result<()> {
        let records = db::fetch_records(&self.pool).await?;
        self.snapshot = gpa::compute_snapshot(&records)?;
        Ok(())
    }
}

fn validate(course: &str, credits: f64, grade: i64, year: &str) -> anyhow::Result<CourseRecord> {
    let year = year.parse()?;
    let course = course.trim();
    if course.is_empty() {
        return Err(ValidationError::EmptyCourse.into());
    }
    // the negated comparison also rejects NaN credits
    if !(credits > 0.0) {
        return Err(ValidationError::NonPositiveCredits(credits).into());
    }
    gpa::grade_points(grade)?;

    Ok(CourseRecord {
        id: Uuid::new_v4(),
        course: course.to_string(),
        credits,
        grade,
        year,
    })
}
