//! Account repository
//!
//! Point lookups and row-level writes against the accounts table. Balance
//! values are written only through `set_balance`; every rule about what a
//! balance may become lives in the engine, not here.

use rand::Rng;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::account::ACCOUNT_NUMBER_RANGE;
use crate::domain::Account;
use crate::error::{AppError, AppResult};

/// Attempts at generating a unique account number before giving up.
/// Collisions are resolved by the unique constraint on `number`.
const MAX_NUMBER_ATTEMPTS: u32 = 5;

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, number, balance, created_at, updated_at";

/// Repository for account rows
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account with a generated number and zero balance.
    ///
    /// The candidate number is a pseudo-random draw; the insert retries on a
    /// unique-constraint violation so two concurrent creates can never end up
    /// sharing a number.
    pub async fn create(&self, first_name: &str, last_name: &str) -> AppResult<Account> {
        let mut attempts = 0;

        loop {
            let number = rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_RANGE);

            let result = sqlx::query_as::<_, Account>(
                r#"
                INSERT INTO accounts (first_name, last_name, number, balance, created_at, updated_at)
                VALUES ($1, $2, $3, 0, NOW(), NOW())
                RETURNING id, first_name, last_name, number, balance, created_at, updated_at
                "#,
            )
            .bind(first_name)
            .bind(last_name)
            .bind(number)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(account) => return Ok(account),
                Err(e) if is_unique_violation(&e) && attempts < MAX_NUMBER_ATTEMPTS => {
                    attempts += 1;
                    tracing::warn!(
                        number,
                        attempts,
                        "Account number collision, regenerating"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fetch an account by internal id.
    pub async fn get_by_id(&self, id: i64) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        account.ok_or_else(|| AppError::account_not_found_by_id(id))
    }

    /// Fetch an account by public account number.
    pub async fn get_by_number(&self, number: i64) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE number = $1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        account.ok_or_else(|| AppError::account_not_found_by_number(number))
    }

    /// List all accounts in insertion order.
    pub async fn list_all(&self) -> AppResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Update name fields, leaving number and balance untouched.
    pub async fn update_identity(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET first_name = $1, last_name = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, first_name, last_name, number, balance, created_at, updated_at
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        account.ok_or_else(|| AppError::account_not_found_by_id(id))
    }

    /// Overwrite the balance of a row inside an open transaction.
    ///
    /// This is the only write path for balances. Validation happened before
    /// this call; the row is expected to be locked by the caller.
    pub async fn set_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        new_balance: i64,
    ) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET balance = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, first_name, last_name, number, balance, created_at, updated_at
            "#,
        )
        .bind(new_balance)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        account.ok_or_else(|| AppError::account_not_found_by_id(id))
    }

    /// Fetch an account by number with a row lock, inside an open transaction.
    ///
    /// Holds the lock until the transaction commits or rolls back, so the
    /// read-validate-write sequence cannot interleave with another writer on
    /// the same row.
    pub async fn get_by_number_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        number: i64,
    ) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE number = $1 FOR UPDATE"
        ))
        .bind(number)
        .fetch_optional(&mut **tx)
        .await?;

        account.ok_or_else(|| AppError::account_not_found_by_number(number))
    }

    /// Hard-delete an account row.
    ///
    /// Deleting an absent id is reported as not-found so callers can tell
    /// "nothing happened" from "succeeded".
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::account_not_found_by_id(id));
        }

        Ok(())
    }

    /// Begin a transaction on the underlying pool.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}
