//! Database module
//!
//! Pool construction and schema bootstrap for the accounts table.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::Config;

/// Connect to Postgres using the configured pool size.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Verify database connectivity with a trivial round trip.
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Create the accounts table if it does not exist.
///
/// The unique constraint on `number` is what makes retried candidate
/// generation in the repository safe, and the balance check backstops the
/// engine's validation.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id          BIGSERIAL PRIMARY KEY,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            number      BIGINT NOT NULL UNIQUE,
            balance     BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0),
            created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ready: accounts table verified");

    Ok(())
}
