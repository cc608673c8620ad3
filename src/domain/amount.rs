//! Amount type
//!
//! Domain primitive for money-movement amounts. All amounts are validated at
//! construction time, so an `Amount` in the system is always a positive whole
//! number of the smallest currency unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A validated, strictly positive amount in smallest currency units.
///
/// Balances themselves are plain `i64` columns (zero is legal there); this
/// type only guards the deltas applied to them. Arithmetic against balances
/// goes through the checked helpers so overflow is an error, never a wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

impl Amount {
    /// Create a new Amount, rejecting zero and negative values.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidAmount(value));
        }

        Ok(Self(value))
    }

    /// Get the underlying integer value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Add this amount to a balance, rejecting overflow.
    pub fn credit(&self, balance: i64) -> Result<i64, DomainError> {
        balance
            .checked_add(self.0)
            .ok_or(DomainError::BalanceOverflow)
    }

    /// Subtract this amount from a balance, rejecting a negative result.
    pub fn debit(&self, balance: i64) -> Result<i64, DomainError> {
        let remaining = balance - self.0;
        if remaining < 0 {
            return Err(DomainError::insufficient_funds(self.0, balance));
        }

        Ok(remaining)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Amount {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(100);
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), 100);
    }

    #[test]
    fn test_amount_zero_rejected() {
        let amount = Amount::new(0);
        assert!(matches!(amount, Err(DomainError::InvalidAmount(0))));
    }

    #[test]
    fn test_amount_negative_rejected() {
        let amount = Amount::new(-5);
        assert!(matches!(amount, Err(DomainError::InvalidAmount(-5))));
    }

    #[test]
    fn test_credit() {
        let amount = Amount::new(50).unwrap();
        assert_eq!(amount.credit(100).unwrap(), 150);
    }

    #[test]
    fn test_credit_overflow_rejected() {
        let amount = Amount::new(1).unwrap();
        let result = amount.credit(i64::MAX);
        assert!(matches!(result, Err(DomainError::BalanceOverflow)));
    }

    #[test]
    fn test_debit() {
        let amount = Amount::new(30).unwrap();
        assert_eq!(amount.debit(100).unwrap(), 70);
    }

    #[test]
    fn test_debit_to_zero_allowed() {
        let amount = Amount::new(100).unwrap();
        assert_eq!(amount.debit(100).unwrap(), 0);
    }

    #[test]
    fn test_debit_insufficient_rejected() {
        let amount = Amount::new(50).unwrap();
        let result = amount.debit(10);
        assert!(matches!(
            result,
            Err(DomainError::InsufficientFunds {
                required: 50,
                available: 10
            })
        ));
    }

    #[test]
    fn test_serde_rejects_non_positive() {
        let ok: Result<Amount, _> = serde_json::from_str("25");
        assert_eq!(ok.unwrap().value(), 25);

        let err: Result<Amount, _> = serde_json::from_str("0");
        assert!(err.is_err());

        let err: Result<Amount, _> = serde_json::from_str("-3");
        assert!(err.is_err());
    }
}
