use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database url: {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    // Every connection to ":memory:" opens its own empty database, so
    // in-memory URLs get a single connection that is never recycled.
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
    }
    .context("Failed to connect to database")?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the tables on boot. The UNIQUE constraints on `employee_id`,
/// `email` and `(employee_id, date)` are the only concurrency-correctness
/// mechanism in the system: racing inserts for the same key resolve to one
/// success and one conflict.
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id TEXT NOT NULL UNIQUE,
            full_name   TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            department  TEXT NOT NULL,
            created_at  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create employees table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id TEXT NOT NULL REFERENCES employees(employee_id),
            date        TEXT NOT NULL,
            status      TEXT NOT NULL,
            UNIQUE(employee_id, date)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create attendance table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_employee ON attendance(employee_id)")
        .execute(pool)
        .await
        .context("Failed to create attendance index")?;

    Ok(())
}
