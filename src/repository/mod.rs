//! Repository module
//!
//! Persistence layer over the accounts table.

pub mod accounts;

pub use accounts::AccountRepository;
