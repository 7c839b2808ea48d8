//! Wires the create form to the account list.
//!
//! The two controllers never reference each other: a successful submit is
//! reported back here as [`Outcome::Applied`], and the coordinator answers it
//! by refreshing the list.

use crate::error::ClientResult;
use crate::form::AccountFormController;
use crate::list::AccountListController;
use crate::lifecycle::Outcome;
use crate::models::Account;
use crate::notify::{ConfirmationGateRef, NotifierRef};
use crate::service::AccountServiceRef;

pub struct Coordinator {
    form: AccountFormController,
    list: AccountListController,
}

impl Coordinator {
    pub fn new(
        service: AccountServiceRef,
        notifier: NotifierRef,
        confirmation: ConfirmationGateRef,
        page_size: usize,
    ) -> Self {
        Self {
            form: AccountFormController::new(service.clone(), notifier.clone()),
            list: AccountListController::new(service, notifier, confirmation, page_size),
        }
    }

    /// Initial load of the list
    pub async fn mount(&mut self) -> ClientResult<Outcome<()>> {
        self.list.refresh().await
    }

    /// Unmount both controllers; in-flight responses are dropped
    pub fn unmount(&self) {
        self.form.unmount();
        self.list.unmount();
    }

    /// Submit the create form and, when an account was created, refresh the
    /// list so it shows up.
    pub async fn submit_new_account(&mut self) -> ClientResult<Outcome<Account>> {
        let outcome = self.form.submit().await?;
        if outcome.is_applied() {
            // refresh reports its own failure
            let _ = self.list.refresh().await;
        }
        Ok(outcome)
    }

    pub fn form(&self) -> &AccountFormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AccountFormController {
        &mut self.form
    }

    pub fn list(&self) -> &AccountListController {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut AccountListController {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::mock::{MockAccountService, Operation, RecordingNotifier, ScriptedConfirmation};
    use crate::models::{AccountField, AccountId};
    use crate::types::AccountType;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn coordinator(service: Arc<MockAccountService>, confirm: bool) -> Coordinator {
        Coordinator::new(
            service,
            Arc::new(RecordingNotifier::new()),
            Arc::new(ScriptedConfirmation::new(confirm)),
            5,
        )
    }

    fn fill(c: &mut Coordinator, number: &str, balance: &str) {
        let form = c.form_mut();
        form.update_field(AccountField::AccountNumber, number).unwrap();
        form.update_field(AccountField::AccountType, "savings").unwrap();
        form.update_field(AccountField::Balance, balance).unwrap();
    }

    #[tokio::test]
    async fn test_created_account_appears_after_refresh() {
        let service = Arc::new(MockAccountService::new());
        let mut c = coordinator(service.clone(), true);
        c.mount().await.unwrap();
        assert!(c.list().accounts().is_empty());

        fill(&mut c, "ACC-1001", "100");
        let created = c.submit_new_account().await.unwrap().applied().unwrap();

        let listed = c.list().find(&created.id).unwrap();
        assert_eq!(listed.account_number, "ACC-1001");
        assert_eq!(listed.account_type, AccountType::Savings);
        assert_eq!(listed.balance, dec!(100));
        assert_eq!(service.call_count(Operation::List), 2);
    }

    #[tokio::test]
    async fn test_rejected_submit_does_not_refresh() {
        let service = Arc::new(MockAccountService::new());
        let mut c = coordinator(service.clone(), true);

        fill(&mut c, "ACC-1001", "-50");
        let err = c.submit_new_account().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
        assert_eq!(service.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_list_state_survives_creation() {
        let service = Arc::new(MockAccountService::new());
        let mut c = coordinator(service.clone(), true);
        c.list_mut().set_search_term("acc-10");

        fill(&mut c, "ACC-1001", "100");
        c.submit_new_account().await.unwrap();
        fill(&mut c, "SAV-2001", "5");
        c.submit_new_account().await.unwrap();

        assert_eq!(c.list().search_term(), "acc-10");
        assert_eq!(c.list().accounts().len(), 2);
        assert_eq!(c.list().filtered_len(), 1);
    }

    #[tokio::test]
    async fn test_full_operator_session() {
        let service = Arc::new(MockAccountService::new());
        let mut c = coordinator(service.clone(), true);
        c.mount().await.unwrap();

        fill(&mut c, "ACC-1001", "100");
        let created = c.submit_new_account().await.unwrap().applied().unwrap();

        let list = c.list_mut();
        list.start_edit(&created);
        list.update_edit_field(AccountField::Balance, "500").unwrap();
        list.commit_edit().await.unwrap();
        assert_eq!(list.find(&created.id).unwrap().balance, dec!(500));

        list.remove_account(&created.id).await.unwrap();
        assert!(list.accounts().is_empty());
        assert!(service.stored().is_empty());
        assert!(list.find(&AccountId::new("missing")).is_none());
    }

    #[tokio::test]
    async fn test_unmount_stops_both_controllers() {
        let service = Arc::new(MockAccountService::new());
        let mut c = coordinator(service.clone(), true);
        c.unmount();

        fill(&mut c, "ACC-1001", "100");
        assert_eq!(c.submit_new_account().await.unwrap(), Outcome::Cancelled);
        assert_eq!(c.mount().await.unwrap(), Outcome::Cancelled);
        assert_eq!(service.total_calls(), 0);
    }
}
