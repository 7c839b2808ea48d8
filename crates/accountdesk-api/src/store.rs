//! In-memory account storage behind the reference backend

use accountdesk_core::{Account, AccountId, AccountInput};

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
    next_id: u64,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All accounts in insertion order
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn create(&mut self, input: AccountInput) -> Result<Account, ApiError> {
        validate(&input.account_number, &input.balance)?;
        self.next_id += 1;
        let account = input.with_id(AccountId::new(format!("{:024x}", self.next_id)));
        self.accounts.push(account.clone());
        Ok(account)
    }

    /// Replace the stored record wholesale; the path id wins over the body id
    pub fn update(&mut self, id: &AccountId, account: Account) -> Result<Account, ApiError> {
        validate(&account.account_number, &account.balance)?;
        let stored = self
            .accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| not_found(id))?;
        *stored = Account { id: id.clone(), ..account };
        Ok(stored.clone())
    }

    pub fn delete(&mut self, id: &AccountId) -> Result<(), ApiError> {
        let position = self
            .accounts
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| not_found(id))?;
        self.accounts.remove(position);
        Ok(())
    }
}

fn not_found(id: &AccountId) -> ApiError {
    ApiError::NotFound {
        resource: format!("account {}", id),
    }
}

fn validate(account_number: &str, balance: &rust_decimal::Decimal) -> Result<(), ApiError> {
    if account_number.trim().is_empty() {
        return Err(ApiError::BadRequest {
            message: "accountNumber is required".to_string(),
        });
    }
    if balance.is_sign_negative() && !balance.is_zero() {
        return Err(ApiError::BadRequest {
            message: "balance cannot be negative".to_string(),
        });
    }
    Ok(())
}
