mod models;

pub use models::*;

use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::analyzer::Analysis;

pub type DbPool = Arc<SqlitePool>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(Arc::new(pool))
}

/// Creates the `users` table when missing. Safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub async fn insert_submission(
    pool: &SqlitePool,
    submission: &NewSubmission<'_>,
) -> Result<i64, sqlx::Error> {
    let (emotion, analysis_error) = match submission.analysis {
        Analysis::Detected(label) => (Some(label.as_str()), None),
        Analysis::Failed(reason) => (None, Some(reason.as_str())),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, image_path, emotion, analysis_error, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(submission.name)
    .bind(submission.email)
    .bind(submission.image_path)
    .bind(emotion)
    .bind(analysis_error)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_submission(pool: &SqlitePool, id: i64) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_submissions(pool: &SqlitePool) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .await
}
