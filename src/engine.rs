//! Balance mutation engine
//!
//! The only component that changes account balances. Each operation runs a
//! read-validate-write sequence inside a single transaction with row locks,
//! so concurrent mutations of the same row serialize and a failed operation
//! leaves every row exactly as it was.

use sqlx::PgPool;

use crate::domain::{Account, Amount, DomainError};
use crate::error::AppResult;
use crate::repository::AccountRepository;

/// Engine for top-up and transfer operations
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    repo: AccountRepository,
}

impl BalanceEngine {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: AccountRepository::new(pool),
        }
    }

    /// Credit a positive amount to the account with the given number.
    pub async fn top_up(&self, number: i64, amount: i64) -> AppResult<Account> {
        let amount = Amount::new(amount)?;

        let mut tx = self.repo.begin().await?;

        let account = self.repo.get_by_number_for_update(&mut tx, number).await?;
        let new_balance = amount.credit(account.balance)?;
        let updated = self.repo.set_balance(&mut tx, account.id, new_balance).await?;

        tx.commit().await?;

        tracing::info!(
            number,
            amount = %amount,
            balance = updated.balance,
            "Top-up applied"
        );

        Ok(updated)
    }

    /// Move a positive amount from the sender to the recipient.
    ///
    /// Both rows are locked in one transaction, in a stable order, so two
    /// opposite-direction transfers on the same pair cannot deadlock and the
    /// debit and credit become visible together or not at all. Returns the
    /// updated sender account.
    pub async fn transfer(
        &self,
        sender_number: i64,
        recipient_number: i64,
        amount: i64,
    ) -> AppResult<Account> {
        let amount = Amount::new(amount)?;

        if sender_number == recipient_number {
            return Err(DomainError::SameAccountTransfer.into());
        }

        let mut tx = self.repo.begin().await?;

        // Lock order is by account number, not by role.
        let (first, second) = lock_order(sender_number, recipient_number);
        let first_account = self.repo.get_by_number_for_update(&mut tx, first).await?;
        let second_account = self.repo.get_by_number_for_update(&mut tx, second).await?;

        let (sender, recipient) = if first_account.number == sender_number {
            (first_account, second_account)
        } else {
            (second_account, first_account)
        };

        let new_sender_balance = amount.debit(sender.balance)?;
        let new_recipient_balance = amount.credit(recipient.balance)?;

        let updated_sender = self
            .repo
            .set_balance(&mut tx, sender.id, new_sender_balance)
            .await?;
        self.repo
            .set_balance(&mut tx, recipient.id, new_recipient_balance)
            .await?;

        tx.commit().await?;

        tracing::info!(
            sender = sender_number,
            recipient = recipient_number,
            amount = %amount,
            sender_balance = updated_sender.balance,
            "Transfer committed"
        );

        Ok(updated_sender)
    }
}

/// Stable lock acquisition order for a pair of account numbers.
fn lock_order(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_order_is_symmetric() {
        assert_eq!(lock_order(3, 7), (3, 7));
        assert_eq!(lock_order(7, 3), (3, 7));
    }

    #[test]
    fn test_lock_order_equal_numbers() {
        // Unreachable through transfer (self-transfer is rejected first),
        // but the helper itself is total.
        assert_eq!(lock_order(5, 5), (5, 5));
    }
}
