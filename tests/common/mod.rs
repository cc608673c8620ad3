//! Common test utilities

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

static SCHEMA_READY: OnceCell<()> = OnceCell::const_new();

/// Connect to the test database and make sure the schema exists.
///
/// Schema creation runs once per test binary. Tests only assert on rows they
/// created themselves, so no global cleanup is needed and tests can run in
/// parallel.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    SCHEMA_READY
        .get_or_init(|| async {
            minibank::db::init_schema(&pool)
                .await
                .expect("Failed to initialize schema");
        })
        .await;

    pool
}

/// An account number no generated account can hold.
///
/// Generated numbers live in [0, 10_000_000), so anything at or above the
/// range is guaranteed to miss.
pub fn unused_account_number() -> i64 {
    minibank::domain::account::ACCOUNT_NUMBER_RANGE + 424_242
}
