//! Account entity
//!
//! The single persisted entity of the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Range for generated public account numbers: [0, 10_000_000)
pub const ACCOUNT_NUMBER_RANGE: i64 = 10_000_000;

/// A bank account row.
///
/// `id` is the internal identity key, `number` the externally addressable
/// account number used by money-movement operations. Both are immutable once
/// assigned. `balance` only ever changes through the balance engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            number: 1_234_567,
            balance: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_account_serializes_all_fields() {
        let account = sample();
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["last_name"], "Lovelace");
        assert_eq!(json["number"], 1_234_567);
        assert_eq!(json["balance"], 0);
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
    }

    #[test]
    fn test_timestamps_ordered() {
        let account = sample();
        assert!(account.updated_at >= account.created_at);
    }
}
