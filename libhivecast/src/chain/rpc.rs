//! [`HiveClient`] backed by `hive_rs::Client`
//!
//! Transaction building, signing and JSON-RPC transport are all done by the
//! client library. This module converts its records into the crate's types.

use std::time::Duration;

use async_trait::async_trait;
use hive_rs::types::{Comment, ExtendedAccount};
use hive_rs::{Client, ClientOptions};
use serde_json::{Map, Value};

use super::{HiveClient, Operation, TransactionConfirmation};
use crate::error::{ChainError, HivecastError, Result};
use crate::keys::PrivateKey;
use crate::types::{Account, Content};

pub struct RpcClient {
    client: Client,
}

impl RpcClient {
    /// Create a client for the node at `url`
    ///
    /// # Errors
    ///
    /// Fails if `url` is blank.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(HivecastError::InvalidInput(
                "Hive API node URL cannot be empty".to_string(),
            ));
        }

        let options = ClientOptions {
            timeout,
            ..ClientOptions::default()
        };
        let client = Client::new(vec![url], options);

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl HiveClient for RpcClient {
    async fn get_accounts(&self, names: &[String]) -> Result<Vec<Account>> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let accounts = self.client.database.get_accounts(&names).await?;

        accounts.into_iter().map(account_from_extended).collect()
    }

    async fn get_content(&self, author: &str, permlink: &str) -> Result<Content> {
        let comment = self.client.database.get_content(author, permlink).await?;
        Ok(content_from_comment(comment))
    }

    async fn broadcast(
        &self,
        operations: Vec<Operation>,
        key: &PrivateKey,
    ) -> Result<TransactionConfirmation> {
        tracing::debug!(operations = operations.len(), "Broadcasting signed transaction");

        let confirmation = self
            .client
            .broadcast
            .send_operations(operations, key.as_hive())
            .await?;

        if confirmation.expired {
            return Err(
                ChainError::Broadcast(format!("transaction {} expired", confirmation.id)).into(),
            );
        }

        Ok(confirmation)
    }
}

fn account_from_extended(account: ExtendedAccount) -> Result<Account> {
    let mut extra: Map<String, Value> = account.extra.into_iter().collect();

    let posting = match extra.remove("posting") {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            ChainError::Decode(format!("account {}: bad posting authority: {}", account.name, e))
        })?,
        None => Default::default(),
    };
    if let Some(reputation) = account.reputation {
        extra.insert("reputation".to_string(), Value::String(reputation));
    }
    if let Some(memo_key) = account.memo_key {
        extra.insert("memo_key".to_string(), Value::String(memo_key));
    }

    Ok(Account {
        name: account.name,
        posting,
        extra,
    })
}

fn content_from_comment(comment: Comment) -> Content {
    let mut extra: Map<String, Value> = comment.extra.into_iter().collect();

    let category = take_string(&mut extra, "category");
    let title = take_string(&mut extra, "title");
    if let Some(parent_author) = comment.parent_author {
        extra.insert("parent_author".to_string(), Value::String(parent_author));
    }
    if let Some(parent_permlink) = comment.parent_permlink {
        extra.insert("parent_permlink".to_string(), Value::String(parent_permlink));
    }

    Content {
        author: comment.author,
        permlink: comment.permlink,
        category,
        title,
        body: comment.body.unwrap_or_default(),
        extra,
    }
}

fn take_string(extra: &mut Map<String, Value>, key: &str) -> String {
    match extra.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}
