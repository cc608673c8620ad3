//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Business rule violations and invariant failures.
///
/// These are independent of the web/storage layers; the application error
/// type maps them onto HTTP statuses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Amount is zero or negative
    #[error("Invalid amount: must be positive (got {0})")]
    InvalidAmount(i64),

    /// Transfer where sender and recipient are the same account
    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    /// Debit would drive the sender balance below zero
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    /// Credit would exceed the representable balance range
    #[error("Balance overflow")]
    BalanceOverflow,
}

impl DomainError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(required: i64, available: i64) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// Check if this is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::SameAccountTransfer | Self::InsufficientFunds { .. }
        )
    }
}
