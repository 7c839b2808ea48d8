//! Account routes - REST collection at `/api/accounts`
//!
//! Features:
//! - List all accounts in insertion order
//! - Create with server-assigned ids
//! - Wholesale replace and delete by id

pub mod api;

pub use api::{api_accounts, api_create_account, api_delete_account, api_update_account};
