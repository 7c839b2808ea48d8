//! Core data models for bank accounts and their drafts

use accountdesk_config::CurrencyConfig;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};
use crate::types::AccountType;

/// Opaque server-assigned account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Account as stored by the accounts service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AccountRecord")]
pub struct Account {
    /// Server-assigned id; written as `_id`
    #[serde(rename = "_id")]
    pub id: AccountId,
    pub account_number: String,
    pub account_type: AccountType,
    /// Current balance, never negative
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Incoming account body. Backends may send `_id`, `id` or both; `_id` wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    #[serde(rename = "_id")]
    underscore_id: Option<AccountId>,
    id: Option<AccountId>,
    account_number: String,
    account_type: AccountType,
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
}

impl TryFrom<AccountRecord> for Account {
    type Error = String;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        let id = record
            .underscore_id
            .or(record.id)
            .ok_or_else(|| "missing field `_id`".to_string())?;
        Ok(Account {
            id,
            account_number: record.account_number,
            account_type: record.account_type,
            balance: record.balance,
        })
    }
}

/// Payload for creating an account; the server assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInput {
    pub account_number: String,
    pub account_type: AccountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl AccountInput {
    /// Attach a server id, producing the stored record
    pub fn with_id(self, id: AccountId) -> Account {
        Account {
            id,
            account_number: self.account_number,
            account_type: self.account_type,
            balance: self.balance,
        }
    }
}

/// Editable account field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    AccountNumber,
    AccountType,
    Balance,
}

impl AccountField {
    /// Wire name of the field
    pub fn name(&self) -> &'static str {
        match self {
            AccountField::AccountNumber => "accountNumber",
            AccountField::AccountType => "accountType",
            AccountField::Balance => "balance",
        }
    }
}

impl std::fmt::Display for AccountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Field values as typed by the operator, before validation.
///
/// Balance is kept as text so a half-typed value survives until submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountFields {
    pub account_number: String,
    pub account_type: AccountType,
    pub balance: String,
}

impl AccountFields {
    /// Set one field from operator input
    pub fn set(&mut self, field: AccountField, value: &str) -> ClientResult<()> {
        match field {
            AccountField::AccountNumber => self.account_number = value.to_string(),
            AccountField::AccountType => {
                self.account_type = value
                    .parse()
                    .map_err(|message: String| ClientError::validation(field.name(), message))?;
            }
            AccountField::Balance => self.balance = value.to_string(),
        }
        Ok(())
    }

    /// Validate the fields into a creation payload
    pub fn validate(&self) -> ClientResult<AccountInput> {
        if self.account_number.trim().is_empty() {
            return Err(ClientError::validation(
                AccountField::AccountNumber.name(),
                "Account number is required.",
            ));
        }

        Ok(AccountInput {
            account_number: self.account_number.clone(),
            account_type: self.account_type,
            balance: parse_balance(&self.balance)?,
        })
    }
}

/// Parse balance text; must be a number no lower than zero
pub fn parse_balance(text: &str) -> ClientResult<Decimal> {
    let field = AccountField::Balance.name();
    let text = text.trim();
    if text.is_empty() {
        return Err(ClientError::validation(field, "Balance is required."));
    }

    let balance = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ClientError::validation(field, "Balance must be a number."))?;

    if balance.is_zero() {
        // "-0" parses with the sign bit set
        return Ok(Decimal::ZERO);
    }
    if balance.is_sign_negative() {
        return Err(ClientError::validation(field, "Balance cannot be negative."));
    }

    Ok(balance)
}

/// Local copy of an account being edited.
///
/// Changes stay here until committed; the id cannot be edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    id: AccountId,
    fields: AccountFields,
}

impl EditDraft {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            fields: AccountFields {
                account_number: account.account_number.clone(),
                account_type: account.account_type,
                balance: account.balance.to_string(),
            },
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn fields(&self) -> &AccountFields {
        &self.fields
    }

    pub fn set(&mut self, field: AccountField, value: &str) -> ClientResult<()> {
        self.fields.set(field, value)
    }

    /// Validate into the full record sent on update
    pub fn to_account(&self) -> ClientResult<Account> {
        Ok(self.fields.validate()?.with_id(self.id.clone()))
    }
}

/// Balance rendering settings
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceFormat {
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: String,
}

impl Default for BalanceFormat {
    fn default() -> Self {
        (&CurrencyConfig::default()).into()
    }
}

impl From<&CurrencyConfig> for BalanceFormat {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            decimal_places: config.decimal_places,
            thousands_separator: config.thousands_separator.clone(),
        }
    }
}

impl BalanceFormat {
    /// Render a balance, e.g. `1,250.50 €`
    pub fn format(&self, balance: Decimal) -> String {
        let rounded = balance
            .round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero);
        let amount = accountdesk_utils::format_amount(
            &rounded.to_string(),
            self.decimal_places as usize,
            &self.thousands_separator,
        );
        if self.symbol.is_empty() {
            amount
        } else {
            format!("{} {}", amount, self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_account() -> Account {
        Account {
            id: AccountId::new("64f1c0ffee"),
            account_number: "ACC-1001".to_string(),
            account_type: AccountType::Savings,
            balance: dec!(100),
        }
    }

    #[test]
    fn test_account_reads_underscore_id() {
        let json = r#"{"_id":"64f1c0ffee","accountNumber":"ACC-1001","accountType":"savings","balance":100}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account, sample_account());
    }

    #[test]
    fn test_account_reads_plain_id_and_fractional_balance() {
        let json = r#"{"id":"7","accountNumber":"ACC-7","accountType":"current","balance":12.5}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id.as_str(), "7");
        assert_eq!(account.account_type, AccountType::Current);
        assert_eq!(account.balance, dec!(12.5));
    }

    #[test]
    fn test_account_writes_balance_as_number() {
        let value = serde_json::to_value(sample_account()).unwrap();
        assert_eq!(value["_id"], "64f1c0ffee");
        assert_eq!(value["accountNumber"], "ACC-1001");
        assert_eq!(value["accountType"], "savings");
        assert!(value["balance"].is_number());
    }

    #[test]
    fn test_account_reads_both_id_keys() {
        let json = r#"{"_id":"64f1c0ffee","id":"virtual","accountNumber":"ACC-1001","accountType":"savings","balance":100}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account, sample_account());

        let accounts: Vec<Account> = serde_json::from_str(&format!("[{}]", json)).unwrap();
        assert_eq!(accounts[0].id.as_str(), "64f1c0ffee");
    }

    #[test]
    fn test_account_without_id_is_rejected() {
        let json = r#"{"accountNumber":"ACC-1001","accountType":"savings","balance":100}"#;
        let err = serde_json::from_str::<Account>(json).unwrap_err();
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn test_negative_zero_balance_is_plain_zero() {
        let balance = parse_balance("-0").unwrap();
        assert!(balance.is_zero());
        assert!(!balance.is_sign_negative());

        let input = AccountInput {
            account_number: "ACC-0".to_string(),
            account_type: AccountType::Savings,
            balance,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["balance"].as_f64(), Some(0.0));
        assert!(!value["balance"].as_f64().unwrap().is_sign_negative());
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("100").unwrap(), dec!(100));
        assert_eq!(parse_balance(" 0.50 ").unwrap(), dec!(0.50));
        assert_eq!(parse_balance("1e3").unwrap(), dec!(1000));
    }

    #[test]
    fn test_parse_balance_rejections() {
        for (text, message) in [
            ("", "Balance is required."),
            ("abc", "Balance must be a number."),
            ("-50", "Balance cannot be negative."),
        ] {
            match parse_balance(text) {
                Err(ClientError::Validation { field, message: got }) => {
                    assert_eq!(field, "balance");
                    assert_eq!(got, message);
                }
                other => panic!("unexpected result for {:?}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_fields_validate() {
        let mut fields = AccountFields::default();
        fields.set(AccountField::AccountNumber, "ACC-1001").unwrap();
        fields.set(AccountField::Balance, "100").unwrap();

        let input = fields.validate().unwrap();
        assert_eq!(input.account_number, "ACC-1001");
        assert_eq!(input.account_type, AccountType::Savings);
        assert_eq!(input.balance, dec!(100));
    }

    #[test]
    fn test_fields_reject_blank_number() {
        let fields = AccountFields {
            account_number: "   ".to_string(),
            account_type: AccountType::Current,
            balance: "10".to_string(),
        };
        assert_eq!(fields.validate().unwrap_err().code(), crate::ErrorCode::ValidationError);
    }

    #[test]
    fn test_invalid_account_type_leaves_field_unchanged() {
        let mut fields = AccountFields::default();
        assert!(fields.set(AccountField::AccountType, "brokerage").is_err());
        assert_eq!(fields.account_type, AccountType::Savings);
    }

    #[test]
    fn test_edit_draft_keeps_id() {
        let account = sample_account();
        let mut draft = EditDraft::from_account(&account);
        draft.set(AccountField::Balance, "500").unwrap();

        let updated = draft.to_account().unwrap();
        assert_eq!(updated.id, account.id);
        assert_eq!(updated.balance, dec!(500));
        assert_eq!(account.balance, dec!(100));
    }

    #[test]
    fn test_balance_format() {
        let format = BalanceFormat::default();
        assert_eq!(format.format(dec!(1250.5)), "1,250.50 €");
        assert_eq!(format.format(dec!(0)), "0.00 €");
        assert_eq!(format.format(dec!(2.345)), "2.35 €");
    }
}
