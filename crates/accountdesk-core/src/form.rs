//! "Create account" form controller

use tokio::sync::watch;

use crate::error::{ClientError, ClientResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::lifecycle::{Lifecycle, LifecycleHandle, Outcome};
use crate::models::{Account, AccountField, AccountFields};
use crate::notify::{messages, NotifierRef};
use crate::service::AccountServiceRef;

/// Submission state: `Idle -> Submitting -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

/// Resets the published state to `Idle` however the submission ends,
/// including when the submit future is dropped mid-flight.
struct SubmittingGuard<'a> {
    state: &'a watch::Sender<SubmitState>,
}

impl<'a> SubmittingGuard<'a> {
    fn enter(state: &'a watch::Sender<SubmitState>) -> Self {
        state.send_replace(SubmitState::Submitting);
        Self { state }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(SubmitState::Idle);
    }
}

pub struct AccountFormController {
    service: AccountServiceRef,
    notifier: NotifierRef,
    logger: Box<dyn ErrorLogger>,
    lifecycle: Lifecycle,
    draft: AccountFields,
    state: watch::Sender<SubmitState>,
}

impl AccountFormController {
    pub fn new(service: AccountServiceRef, notifier: NotifierRef) -> Self {
        let (state, _) = watch::channel(SubmitState::Idle);
        Self {
            service,
            notifier,
            logger: Box::new(DefaultErrorLogger),
            lifecycle: Lifecycle::mount(),
            draft: AccountFields::default(),
            state,
        }
    }

    pub fn with_error_logger(mut self, logger: Box<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn lifecycle_handle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    pub fn draft(&self) -> &AccountFields {
        &self.draft
    }

    pub fn update_field(&mut self, field: AccountField, value: &str) -> ClientResult<()> {
        self.draft.set(field, value)
    }

    /// Clear every field back to its default
    pub fn reset(&mut self) {
        self.draft = AccountFields::default();
    }

    pub fn is_submitting(&self) -> bool {
        *self.state.borrow() == SubmitState::Submitting
    }

    /// Watch the submission state, e.g. to disable the submit button
    pub fn subscribe(&self) -> watch::Receiver<SubmitState> {
        self.state.subscribe()
    }

    /// Validate and create the drafted account.
    ///
    /// Validation failures return before any request. On success the draft
    /// resets to its defaults and the created account is returned; on
    /// failure the draft is kept so the operator can retry.
    pub async fn submit(&mut self) -> ClientResult<Outcome<Account>> {
        let context = ErrorContext::new("submit");

        let input = match self.draft.validate() {
            Ok(input) => input,
            Err(error) => return Err(self.report(error, &context)),
        };

        let result = {
            let _submitting = SubmittingGuard::enter(&self.state);
            self.lifecycle.run(self.service.create(&input)).await
        };

        match result {
            None => Ok(Outcome::Cancelled),
            Some(Ok(account)) => {
                log::info!("Created account {} ({})", account.account_number, account.id);
                self.reset();
                self.notifier.notify_success(messages::CREATE_SUCCESS);
                Ok(Outcome::Applied(account))
            }
            Some(Err(error)) => Err(self.report(error, &context)),
        }
    }

    fn report(&self, error: ClientError, context: &ErrorContext) -> ClientError {
        self.logger.log_error(&error, context);
        self.notifier.notify_error(&error.user_message(messages::CREATE_FAILED));
        error
    }
}
