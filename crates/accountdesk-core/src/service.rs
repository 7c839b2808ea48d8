//! Accounts REST service client
//!
//! Every successful response is wrapped as `{ "data": <payload> }`; a body
//! without the `data` key is a protocol error. There are no retries and no
//! timeout beyond the transport default.

use accountdesk_config::Config;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::models::{Account, AccountId, AccountInput};

/// Service reference type
pub type AccountServiceRef = Arc<dyn AccountService>;

/// The four account operations of the accounts service
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Fetch the whole collection, in backend order
    async fn list(&self) -> ClientResult<Vec<Account>>;

    /// Create an account; the server assigns its id
    async fn create(&self, input: &AccountInput) -> ClientResult<Account>;

    /// Replace the stored record wholesale
    async fn update(&self, id: &AccountId, account: &Account) -> ClientResult<Account>;

    async fn delete(&self, id: &AccountId) -> ClientResult<()>;
}

/// reqwest-backed implementation of [`AccountService`]
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    client: Client,
    accounts_url: String,
}

impl HttpAccountService {
    /// Create a client for the collection at `accounts_url`
    pub fn new(accounts_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), accounts_url)
    }

    pub fn with_client(client: Client, accounts_url: impl Into<String>) -> Self {
        Self {
            client,
            accounts_url: accounts_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.accounts_url())
    }

    pub fn accounts_url(&self) -> &str {
        &self.accounts_url
    }

    fn item_url(&self, id: &AccountId) -> String {
        format!("{}/{}", self.accounts_url, urlencoding::encode(id.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        log::warn!("Accounts service answered {}: {}", status, message);

        Err(ClientError::Protocol {
            status: Some(status.as_u16()),
            message,
        })
    }
}

/// Pull the payload out of a `{ "data": ... }` envelope
async fn unwrap_data<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body: serde_json::Value = response.json().await?;
    extract_data(body)
}

pub(crate) fn extract_data<T: DeserializeOwned>(body: serde_json::Value) -> ClientResult<T> {
    let data = match body {
        serde_json::Value::Object(mut map) => map.remove("data"),
        _ => None,
    }
    .ok_or_else(|| ClientError::protocol("response is missing the `data` envelope"))?;

    serde_json::from_value(data)
        .map_err(|e| ClientError::protocol(format!("unexpected `data` payload: {}", e)))
}

/// Error text from a failure body shaped `{ "error": .. }` or `{ "message": .. }`
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn list(&self) -> ClientResult<Vec<Account>> {
        log::debug!("GET {}", self.accounts_url);
        let response = self.send(self.client.get(&self.accounts_url)).await?;
        unwrap_data(response).await
    }

    async fn create(&self, input: &AccountInput) -> ClientResult<Account> {
        log::debug!("POST {} ({})", self.accounts_url, input.account_number);
        let response = self
            .send(self.client.post(&self.accounts_url).json(input))
            .await?;
        unwrap_data(response).await
    }

    async fn update(&self, id: &AccountId, account: &Account) -> ClientResult<Account> {
        let url = self.item_url(id);
        log::debug!("PUT {}", url);
        let response = self.send(self.client.put(&url).json(account)).await?;
        unwrap_data(response).await
    }

    async fn delete(&self, id: &AccountId) -> ClientResult<()> {
        let url = self.item_url(id);
        log::debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_data_list() {
        let body = json!({
            "data": [
                {"_id": "a1", "accountNumber": "ACC-1001", "accountType": "savings", "balance": 100}
            ]
        });
        let accounts: Vec<Account> = extract_data(body).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].account_number, "ACC-1001");
    }

    #[test]
    fn test_extract_data_missing_envelope() {
        let body = json!([{"_id": "a1"}]);
        let err = extract_data::<Vec<Account>>(body).unwrap_err();
        assert!(matches!(err, ClientError::Protocol { status: None, .. }));

        let body = json!({"accounts": []});
        assert!(extract_data::<Vec<Account>>(body).is_err());
    }

    #[test]
    fn test_extract_data_wrong_shape() {
        let body = json!({"data": {"_id": "a1", "accountNumber": "ACC-1"}});
        let err = extract_data::<Account>(body).unwrap_err();
        assert!(err.to_string().contains("unexpected `data` payload"));
    }

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"error":"Account not found"}"#).as_deref(), Some("Account not found"));
        assert_eq!(server_message(r#"{"message":"Bad input"}"#).as_deref(), Some("Bad input"));
        assert_eq!(server_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_item_url_encodes_id() {
        let service = HttpAccountService::new("http://localhost:5008/api/accounts/");
        assert_eq!(service.accounts_url(), "http://localhost:5008/api/accounts");
        assert_eq!(
            service.item_url(&AccountId::new("a b/c")),
            "http://localhost:5008/api/accounts/a%20b%2Fc"
        );
    }
}
