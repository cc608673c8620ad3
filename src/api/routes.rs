//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::Account;
use crate::engine::BalanceEngine;
use crate::error::AppError;
use crate::service::AccountService;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopUpRequest {
    pub number: i64,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_number: i64,
    pub to_number: i64,
    pub amount: i64,
}

/// Tagged response for deletions, so the payload shape is fixed per
/// response kind rather than an anonymous map.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub deleted: i64,
}

#[derive(Debug, Serialize)]
pub struct AccountListResponse {
    pub accounts: Vec<Account>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts", get(list_accounts))
        .route("/accounts/:id", get(get_account))
        .route("/accounts/:id", patch(update_account))
        .route("/accounts/:id", delete(delete_account))
        .route("/topup", post(top_up))
        .route("/transfer", post(transfer))
}

// =========================================================================
// POST /accounts
// =========================================================================

/// Create a new account
async fn create_account(
    State(pool): State<PgPool>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let service = AccountService::new(pool);

    let account = service.create(&request.first_name, &request.last_name).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

// =========================================================================
// GET /accounts
// =========================================================================

/// List all accounts
async fn list_accounts(
    State(pool): State<PgPool>,
) -> Result<Json<AccountListResponse>, AppError> {
    let service = AccountService::new(pool);

    let accounts = service.list().await?;

    Ok(Json(AccountListResponse { accounts }))
}

// =========================================================================
// GET /accounts/:id
// =========================================================================

/// Get account by id
async fn get_account(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<Account>, AppError> {
    let service = AccountService::new(pool);

    let account = service.get(id).await?;

    Ok(Json(account))
}

// =========================================================================
// PATCH /accounts/:id
// =========================================================================

/// Rename an account
async fn update_account(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    let service = AccountService::new(pool);

    let account = service
        .rename(id, &request.first_name, &request.last_name)
        .await?;

    Ok(Json(account))
}

// =========================================================================
// DELETE /accounts/:id
// =========================================================================

/// Delete an account
async fn delete_account(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteAccountResponse>, AppError> {
    let service = AccountService::new(pool);

    service.delete(id).await?;

    Ok(Json(DeleteAccountResponse { deleted: id }))
}

// =========================================================================
// POST /topup
// =========================================================================

/// Credit an amount to an account, addressed by account number
async fn top_up(
    State(pool): State<PgPool>,
    Json(request): Json<TopUpRequest>,
) -> Result<Json<Account>, AppError> {
    let engine = BalanceEngine::new(pool);

    let account = engine.top_up(request.number, request.amount).await?;

    Ok(Json(account))
}

// =========================================================================
// POST /transfer
// =========================================================================

/// Transfer an amount between two accounts, addressed by account number.
/// Responds with the updated sender account.
async fn transfer(
    State(pool): State<PgPool>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<Account>, AppError> {
    let engine = BalanceEngine::new(pool);

    let account = engine
        .transfer(request.from_number, request.to_number, request.amount)
        .await?;

    Ok(Json(account))
}
