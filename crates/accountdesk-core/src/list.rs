//! Account list controller
//!
//! Owns the fetched collection, the search term, the pagination cursor and
//! the edit draft. The visible page is always derived from those four on
//! read; nothing is cached between calls.
//!
//! - `refresh` replaces the collection wholesale
//! - edits go through an [`EditDraft`] and only reach the collection through
//!   the server (update, then refresh)
//! - removal asks the confirmation gate, then drops the entry locally

use crate::error::{ClientError, ClientResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::lifecycle::{Lifecycle, LifecycleHandle, Outcome};
use crate::models::{Account, AccountField, AccountId, EditDraft};
use crate::notify::{messages, ConfirmationGateRef, NotifierRef};
use crate::service::AccountServiceRef;

pub struct AccountListController {
    service: AccountServiceRef,
    notifier: NotifierRef,
    confirmation: ConfirmationGateRef,
    logger: Box<dyn ErrorLogger>,
    lifecycle: Lifecycle,
    accounts: Vec<Account>,
    search_term: String,
    page: usize,
    page_size: usize,
    edit_draft: Option<EditDraft>,
}

impl AccountListController {
    /// Mount a controller with an empty collection. `page_size` of 0 is
    /// raised to 1.
    pub fn new(
        service: AccountServiceRef,
        notifier: NotifierRef,
        confirmation: ConfirmationGateRef,
        page_size: usize,
    ) -> Self {
        Self {
            service,
            notifier,
            confirmation,
            logger: Box::new(DefaultErrorLogger),
            lifecycle: Lifecycle::mount(),
            accounts: Vec::new(),
            search_term: String::new(),
            page: 0,
            page_size: page_size.max(1),
            edit_draft: None,
        }
    }

    pub fn with_error_logger(mut self, logger: Box<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn lifecycle_handle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    // ==================== Collection ====================

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    /// Reload the collection from the service.
    ///
    /// On failure the previous collection is kept.
    pub async fn refresh(&mut self) -> ClientResult<Outcome<()>> {
        let Some(result) = self.lifecycle.run(self.service.list()).await else {
            log::debug!("refresh abandoned: list controller unmounted");
            return Ok(Outcome::Cancelled);
        };

        match result {
            Ok(accounts) => {
                log::debug!("Loaded {} accounts", accounts.len());
                self.accounts = accounts;
                Ok(Outcome::Applied(()))
            }
            Err(error) => Err(self.report(error, messages::LOAD_FAILED, ErrorContext::new("refresh"))),
        }
    }

    // ==================== Search & pagination ====================

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Change the search term. The page is left where it is.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change rows per page and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> ClientResult<()> {
        if page_size == 0 {
            return Err(ClientError::validation("pageSize", "Page size must be greater than 0."));
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Accounts whose number contains the search term, ignoring case
    pub fn filtered(&self) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| accountdesk_utils::contains_ignore_case(&a.account_number, &self.search_term))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Slice of `filtered` for the current page; empty when the page is past
    /// the end.
    pub fn visible_page(&self) -> Vec<&Account> {
        self.filtered()
            .into_iter()
            .skip(self.page.saturating_mul(self.page_size))
            .take(self.page_size)
            .collect()
    }

    /// Number of pages needed for `filtered`
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size)
    }

    // ==================== Editing ====================

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.edit_draft.as_ref()
    }

    /// Open a draft copy of `account`, replacing any open draft
    pub fn start_edit(&mut self, account: &Account) {
        log::debug!("Editing account {}", account.id);
        self.edit_draft = Some(EditDraft::from_account(account));
    }

    /// Change one field of the open draft
    pub fn update_edit_field(&mut self, field: AccountField, value: &str) -> ClientResult<()> {
        match self.edit_draft.as_mut() {
            Some(draft) => draft.set(field, value),
            None => Err(no_open_draft()),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_draft = None;
    }

    /// Send the draft to the service.
    ///
    /// On success the draft is closed and the collection refreshed; on any
    /// failure the draft stays open for another attempt.
    pub async fn commit_edit(&mut self) -> ClientResult<Outcome<Account>> {
        let Some(draft) = self.edit_draft.as_ref() else {
            return Err(self.report(no_open_draft(), messages::UPDATE_FAILED, ErrorContext::new("commit_edit")));
        };
        let context = ErrorContext::new("commit_edit").with_account_id(draft.id().as_str());

        let account = match draft.to_account() {
            Ok(account) => account,
            Err(error) => return Err(self.report(error, messages::UPDATE_FAILED, context)),
        };

        let Some(result) = self.lifecycle.run(self.service.update(&account.id, &account)).await else {
            return Ok(Outcome::Cancelled);
        };

        match result {
            Ok(updated) => {
                self.edit_draft = None;
                self.notifier.notify_success(messages::UPDATE_SUCCESS);
                // refresh reports its own failure
                let _ = self.refresh().await;
                Ok(Outcome::Applied(updated))
            }
            Err(error) => Err(self.report(error, messages::UPDATE_FAILED, context)),
        }
    }

    // ==================== Removal ====================

    /// Delete an account after the confirmation gate agrees.
    ///
    /// The entry is removed locally on success, without a refresh.
    pub async fn remove_account(&mut self, id: &AccountId) -> ClientResult<Outcome<()>> {
        if !self.lifecycle.is_mounted() {
            return Ok(Outcome::Cancelled);
        }
        if !self.confirmation.confirm(messages::DELETE_PROMPT) {
            log::debug!("Removal of {} declined", id);
            return Ok(Outcome::Declined);
        }

        let Some(result) = self.lifecycle.run(self.service.delete(id)).await else {
            return Ok(Outcome::Cancelled);
        };

        match result {
            Ok(()) => {
                self.accounts.retain(|a| &a.id != id);
                self.notifier.notify_success(messages::DELETE_SUCCESS);
                Ok(Outcome::Applied(()))
            }
            Err(error) => Err(self.report(
                error,
                messages::DELETE_FAILED,
                ErrorContext::new("remove_account").with_account_id(id.as_str()),
            )),
        }
    }

    fn report(&self, error: ClientError, failed: &str, context: ErrorContext) -> ClientError {
        self.logger.log_error(&error, &context);
        self.notifier.notify_error(&error.user_message(failed));
        error
    }
}

fn no_open_draft() -> ClientError {
    ClientError::validation("editDraft", "No account is being edited.")
}
