//! Accounts JSON API endpoints
//!
//! Successful bodies are wrapped as `{ "data": ... }`.

use crate::error::ApiError;
use crate::AppState;
use accountdesk_core::{Account, AccountId, AccountInput};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn api_accounts(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.read().await;
    Json(json!({ "data": store.list() }))
}

pub async fn api_create_account(
    State(state): State<AppState>,
    Json(input): Json<AccountInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let account = state.store.write().await.create(input)?;
    log::info!("Created account {} ({})", account.account_number, account.id);
    Ok((StatusCode::CREATED, Json(json!({ "data": account }))))
}

pub async fn api_update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(account): Json<Account>,
) -> Result<Json<Value>, ApiError> {
    let account = state.store.write().await.update(&AccountId::new(id), account)?;
    log::info!("Updated account {}", account.id);
    Ok(Json(json!({ "data": account })))
}

pub async fn api_delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = AccountId::new(id);
    state.store.write().await.delete(&id)?;
    log::info!("Deleted account {}", id);
    Ok(Json(json!({ "message": "Account deleted" })))
}
