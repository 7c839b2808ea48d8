//! In-memory test doubles for controller tests.
//!
//! - [`MockAccountService`]: stores accounts, records every call, and can be
//!   told to fail the next call of an operation or to answer slowly
//! - [`RecordingNotifier`]: keeps every notification
//! - [`ScriptedConfirmation`]: answers the confirmation gate with a preset
//!   answer and records the prompts it saw

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::models::{Account, AccountId, AccountInput};
use crate::notify::{ConfirmationGate, Notifier};
use crate::service::AccountService;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Operation kinds of the accounts service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// A call received by the mock, with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    List,
    Create(AccountInput),
    Update(AccountId, Account),
    Delete(AccountId),
}

impl ServiceCall {
    pub fn operation(&self) -> Operation {
        match self {
            ServiceCall::List => Operation::List,
            ServiceCall::Create(_) => Operation::Create,
            ServiceCall::Update(..) => Operation::Update,
            ServiceCall::Delete(_) => Operation::Delete,
        }
    }
}

/// Controllable in-memory accounts service
#[derive(Debug, Default)]
pub struct MockAccountService {
    accounts: Mutex<Vec<Account>>,
    calls: Mutex<Vec<ServiceCall>>,
    failures: Mutex<HashMap<Operation, ClientError>>,
    latency: Mutex<Option<Duration>>,
    next_id: AtomicU64,
}

impl MockAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let service = Self::new();
        *lock(&service.accounts) = accounts;
        service
    }

    /// Make every call wait before answering
    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.latency) = Some(latency);
    }

    /// Fail the next call of `operation` with `error`
    pub fn fail_next(&self, operation: Operation, error: ClientError) {
        lock(&self.failures).insert(operation, error);
    }

    /// Server-side state, bypassing the call log
    pub fn stored(&self) -> Vec<Account> {
        lock(&self.accounts).clone()
    }

    /// Change server-side state behind the client's back
    pub fn insert(&self, account: Account) {
        lock(&self.accounts).push(account);
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).len()
    }

    async fn receive(&self, call: ServiceCall) -> ClientResult<()> {
        let operation = call.operation();
        lock(&self.calls).push(call);

        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match lock(&self.failures).remove(&operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(id: &AccountId) -> ClientError {
        ClientError::Protocol {
            status: Some(404),
            message: format!("Account not found: {}", id),
        }
    }
}

#[async_trait]
impl AccountService for MockAccountService {
    async fn list(&self) -> ClientResult<Vec<Account>> {
        self.receive(ServiceCall::List).await?;
        Ok(self.stored())
    }

    async fn create(&self, input: &AccountInput) -> ClientResult<Account> {
        self.receive(ServiceCall::Create(input.clone())).await?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let account = input.clone().with_id(AccountId::new(format!("{:024x}", n)));
        lock(&self.accounts).push(account.clone());
        Ok(account)
    }

    async fn update(&self, id: &AccountId, account: &Account) -> ClientResult<Account> {
        self.receive(ServiceCall::Update(id.clone(), account.clone())).await?;
        let mut accounts = lock(&self.accounts);
        let stored = accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        *stored = Account { id: id.clone(), ..account.clone() };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &AccountId) -> ClientResult<()> {
        self.receive(ServiceCall::Delete(id.clone())).await?;
        let mut accounts = lock(&self.accounts);
        let before = accounts.len();
        accounts.retain(|a| &a.id != id);
        if accounts.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

/// Notification kinds recorded by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message),
                Notification::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success(message) => Some(message),
                Notification::Error(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        lock(&self.notifications).push(Notification::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        lock(&self.notifications).push(Notification::Error(message.to_string()));
    }
}

#[derive(Debug)]
pub struct ScriptedConfirmation {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

impl ConfirmationGate for ScriptedConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        lock(&self.prompts).push(prompt.to_string());
        self.answer
    }
}
