//! Account service
//!
//! Identity lifecycle over the repository: create, get, list, rename,
//! delete. Balance changes are the engine's job; this service never touches
//! them.

use sqlx::PgPool;

use crate::domain::Account;
use crate::error::AppResult;
use crate::repository::AccountRepository;

/// Orchestrates account identity operations
#[derive(Debug, Clone)]
pub struct AccountService {
    repo: AccountRepository,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: AccountRepository::new(pool),
        }
    }

    /// Create an account with zero balance and a fresh account number.
    pub async fn create(&self, first_name: &str, last_name: &str) -> AppResult<Account> {
        let account = self.repo.create(first_name, last_name).await?;

        tracing::info!(
            id = account.id,
            number = account.number,
            "Account created"
        );

        Ok(account)
    }

    /// Fetch an account by internal id.
    pub async fn get(&self, id: i64) -> AppResult<Account> {
        self.repo.get_by_id(id).await
    }

    /// List all accounts.
    pub async fn list(&self) -> AppResult<Vec<Account>> {
        self.repo.list_all().await
    }

    /// Rename an account, leaving number and balance untouched.
    pub async fn rename(&self, id: i64, first_name: &str, last_name: &str) -> AppResult<Account> {
        self.repo.update_identity(id, first_name, last_name).await
    }

    /// Hard-delete an account.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;

        tracing::info!(id, "Account deleted");

        Ok(())
    }
}
