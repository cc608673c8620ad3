//! minibank library
//!
//! Account records and money-movement operations over HTTP, backed by a
//! single Postgres accounts table. Re-exports modules for integration
//! testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod repository;
pub mod service;

pub use config::Config;
pub use domain::{Account, Amount, DomainError};
pub use engine::BalanceEngine;
pub use error::{AppError, AppResult};
pub use repository::AccountRepository;
pub use service::AccountService;
