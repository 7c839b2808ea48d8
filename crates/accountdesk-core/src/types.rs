//! Basic types for the account model

use serde::{Deserialize, Serialize};

/// Account type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Savings account
    #[default]
    Savings,
    /// Current (checking) account
    Current,
}

impl AccountType {
    /// Label shown in account tables
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" => Ok(AccountType::Savings),
            "current" | "checking" => Ok(AccountType::Current),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Savings => write!(f, "savings"),
            AccountType::Current => write!(f, "current"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_parse() {
        assert_eq!("savings".parse::<AccountType>(), Ok(AccountType::Savings));
        assert_eq!("Current".parse::<AccountType>(), Ok(AccountType::Current));
        assert!("brokerage".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_account_type_wire_format() {
        assert_eq!(serde_json::to_string(&AccountType::Current).unwrap(), "\"current\"");
        let parsed: AccountType = serde_json::from_str("\"savings\"").unwrap();
        assert_eq!(parsed, AccountType::Savings);
        assert_eq!(AccountType::default(), AccountType::Savings);
    }
}
