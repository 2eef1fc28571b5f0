//! Mock Hive client for testing
//!
//! Simulates a node holding a fixed set of accounts and posts. Broadcasts can
//! be made to succeed or fail, and every broadcast is recorded so tests can
//! inspect the operations the service built.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use hive_rs::types::Authority;

use crate::chain::{HiveClient, Operation, TransactionConfirmation};
use crate::error::{ChainError, Result};
use crate::keys::PrivateKey;
use crate::types::{Account, Content};

/// A broadcast the mock accepted or rejected
#[derive(Debug, Clone)]
pub struct RecordedBroadcast {
    pub operations: Vec<Operation>,
    /// `STM...` public key of the signing key
    pub signer: String,
}

/// Configuration for mock client behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub accounts: HashMap<String, Account>,

    /// Keyed by `(author, permlink)`
    pub contents: HashMap<(String, String), Content>,

    /// Whether broadcasting should succeed
    pub broadcast_succeeds: bool,

    /// Error to return on broadcast failure
    pub broadcast_error: Option<String>,

    /// Error to return from every query (simulates an unreachable node)
    pub query_error: Option<String>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    /// Number of times each query has been called
    pub query_call_count: Arc<Mutex<usize>>,

    /// Broadcasts that have been made (for verification)
    pub broadcasts: Arc<Mutex<Vec<RecordedBroadcast>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            contents: HashMap::new(),
            broadcast_succeeds: true,
            broadcast_error: None,
            query_error: None,
            delay: Duration::from_millis(0),
            query_call_count: Arc::new(Mutex::new(0)),
            broadcasts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock Hive client for testing
#[derive(Debug, Clone)]
pub struct MockHiveClient {
    config: MockConfig,
}

impl MockHiveClient {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A node with no accounts that accepts every broadcast
    pub fn empty() -> Self {
        Self::new(MockConfig::default())
    }

    /// A node whose broadcasts fail with `error`
    pub fn broadcast_failure(error: &str) -> Self {
        Self::new(MockConfig {
            broadcast_succeeds: false,
            broadcast_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// A node that cannot be reached at all
    pub fn unreachable(error: &str) -> Self {
        Self::new(MockConfig {
            broadcast_succeeds: false,
            broadcast_error: Some(error.to_string()),
            query_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Add an account whose posting authority lists `posting_keys`
    pub fn with_account(mut self, name: &str, posting_keys: &[String]) -> Self {
        let account = Account {
            name: name.to_string(),
            posting: Authority {
                weight_threshold: 1,
                account_auths: Vec::new(),
                key_auths: posting_keys.iter().map(|k| (k.clone(), 1)).collect(),
            },
            extra: serde_json::Map::new(),
        };
        self.config.accounts.insert(name.to_string(), account);
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.config
            .contents
            .insert((content.author.clone(), content.permlink.clone()), content);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Get the number of query calls made
    pub fn query_call_count(&self) -> usize {
        *self.config.query_call_count.lock().unwrap()
    }

    /// Get all broadcasts that were attempted
    pub fn broadcasts(&self) -> Vec<RecordedBroadcast> {
        self.config.broadcasts.lock().unwrap().clone()
    }

    async fn begin_query(&self) -> Result<()> {
        *self.config.query_call_count.lock().unwrap() += 1;

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        match &self.config.query_error {
            Some(error) => Err(ChainError::Network(error.clone()).into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HiveClient for MockHiveClient {
    async fn get_accounts(&self, names: &[String]) -> Result<Vec<Account>> {
        self.begin_query().await?;

        Ok(names
            .iter()
            .filter_map(|name| self.config.accounts.get(name).cloned())
            .collect())
    }

    async fn get_content(&self, author: &str, permlink: &str) -> Result<Content> {
        self.begin_query().await?;

        let key = (author.to_string(), permlink.to_string());
        Ok(self.config.contents.get(&key).cloned().unwrap_or_else(|| Content {
            author: String::new(),
            permlink: String::new(),
            category: String::new(),
            title: String::new(),
            body: String::new(),
            extra: serde_json::Map::new(),
        }))
    }

    async fn broadcast(
        &self,
        operations: Vec<Operation>,
        key: &PrivateKey,
    ) -> Result<TransactionConfirmation> {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        let mut broadcasts = self.config.broadcasts.lock().unwrap();
        broadcasts.push(RecordedBroadcast {
            operations,
            signer: key.public_key().to_string(),
        });

        if self.config.broadcast_succeeds {
            Ok(TransactionConfirmation {
                id: format!("{:040x}", broadcasts.len()),
                block_num: 80_000_000 + broadcasts.len() as u32,
                trx_num: 0,
                expired: false,
            })
        } else {
            let error_msg = self
                .config
                .broadcast_error
                .clone()
                .unwrap_or_else(|| "Mock broadcast failed".to_string());
            Err(ChainError::Broadcast(error_msg).into())
        }
    }
}
