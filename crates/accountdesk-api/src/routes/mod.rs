//! Route modules for the reference backend
//!
//! - accounts: the accounts REST collection

pub mod accounts;
