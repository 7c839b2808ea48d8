//! Core account data management
//!
//! - `service`: the accounts REST service and its reqwest client
//! - `list`: collection, search, pagination, edit draft, removal
//! - `form`: the "create account" draft and its submission
//! - `coordinator`: refreshes the list after a successful creation
//! - `lifecycle`: mount/unmount with cancellation of in-flight requests
//! - `mock`: in-memory service and collaborators for tests

pub mod coordinator;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod list;
pub mod mock;
pub mod models;
pub mod notify;
pub mod service;
pub mod types;

pub use coordinator::Coordinator;
pub use error::{ClientError, ClientResult, ErrorCode, ErrorSeverity};
pub use form::{AccountFormController, SubmitState};
pub use lifecycle::{Lifecycle, LifecycleHandle, Outcome};
pub use list::AccountListController;
pub use models::{Account, AccountField, AccountFields, AccountId, AccountInput, BalanceFormat, EditDraft};
pub use notify::{ConfirmationGate, ConfirmationGateRef, LogNotifier, Notifier, NotifierRef};
pub use service::{AccountService, AccountServiceRef, HttpAccountService};
pub use types::AccountType;
