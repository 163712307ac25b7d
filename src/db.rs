use anyhow::Context;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{AcademicYear, CourseRecord};

/// Creates the `grades` table if it does not exist yet. The schema is fixed
/// for the life of the store; there is no versioning.
pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS grades (
            id TEXT PRIMARY KEY,
            course TEXT NOT NULL,
            credits REAL NOT NULL,
            grade INTEGER NOT NULL,
            year TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create grades table")?;

    Ok(())
}

pub async fn insert_record(pool: &SqlitePool, record: &CourseRecord) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO grades (id, course, credits, grade, year)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.course)
    .bind(record.credits)
    .bind(record.grade)
    .bind(record.year.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Deletes a record by id, returning the number of rows removed (0 or 1).
pub async fn delete_record(pool: &SqlitePool, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM grades WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn fetch_records(pool: &SqlitePool) -> anyhow::Result<Vec<CourseRecord>> {
    let rows = sqlx::query("SELECT id, course, credits, grade, year FROM grades")
        .fetch_all(pool)
        .await?;

    let mut records = Vec::new();
    for row in rows {
        let id: String = row.get("id");
        let year: String = row.get("year");
        records.push(CourseRecord {
            id: Uuid::parse_str(&id).context("malformed record id in storage")?,
            course: row.get("course"),
            credits: row.get("credits"),
            grade: row.get("grade"),
            year: year
                .parse::<AcademicYear>()
                .context("malformed academic year in storage")?,
        });
    }

    Ok(records)
}
