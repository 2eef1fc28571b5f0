//! Publishing facade over a Hive client
//!
//! [`HiveService`] is the entry point callers use. Every public operation is
//! an error boundary: failures are logged and turned into a failed
//! [`PostResult`], `None` or `false`, never returned as `Err`.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{debug, error, info};

use crate::chain::rpc::RpcClient;
use crate::chain::{
    Asset, AssetSymbol, BeneficiaryRoute, CommentOperation, CommentOptionsExtension,
    CommentOptionsOperation, HiveClient, Operation,
};
use crate::config::{Config, PublishConfig};
use crate::error::{HivecastError, Result};
use crate::keys::PrivateKey;
use crate::permlink::generate_permlink;
use crate::types::{Account, Content, PostRequest, PostResult};

/// Base of canonical post URLs
pub const POST_URL_BASE: &str = "https://hive.blog";

/// Largest payout a post accepts, in HBD thousandths (1,000,000.000 HBD)
const MAX_ACCEPTED_PAYOUT: i64 = 1_000_000_000;

/// Full 50/50 HBD/HP reward split
const PERCENT_HBD: u16 = 10_000;

/// Canonical URL of a post
pub fn post_url(author: &str, permlink: &str) -> String {
    format!("{}/@{}/{}", POST_URL_BASE, author, permlink)
}

pub struct HiveService {
    client: Arc<dyn HiveClient>,
    key: PrivateKey,
    username: String,
    publish: PublishConfig,
}

impl HiveService {
    pub fn new(
        client: Arc<dyn HiveClient>,
        key: PrivateKey,
        username: impl Into<String>,
        publish: PublishConfig,
    ) -> Self {
        Self {
            client,
            key,
            username: username.into(),
            publish,
        }
    }

    /// Build a service talking to the configured node with the configured key
    ///
    /// # Errors
    ///
    /// Fails if the posting key is missing or not valid WIF, or the node URL
    /// is blank.
    pub fn from_config(config: &Config) -> Result<Self> {
        let wif = config.posting_key()?;
        let key = PrivateKey::from_wif(wif.expose_secret())?;
        let client = RpcClient::new(&config.hive.api_url, config.timeout())?;

        Ok(Self::new(
            Arc::new(client),
            key,
            config.hive.username.clone(),
            config.publish.clone(),
        ))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Publish a post with payout options and the platform beneficiary
    pub async fn publish_post(&self, request: PostRequest) -> PostResult {
        let author = if request.author.trim().is_empty() {
            self.username.clone()
        } else {
            request.author.clone()
        };
        let permlink = generate_permlink(&request.title);

        match self.try_publish(&request, &author, &permlink).await {
            Ok(tx_id) => {
                let url = post_url(&author, &permlink);
                info!(author = %author, permlink = %permlink, tx_id = %tx_id, "Published post");
                PostResult::published(tx_id, permlink, url)
            }
            Err(e) => {
                error!(author = %author, permlink = %permlink, "Failed to publish post: {}", e);
                PostResult::failed(format!("Failed to publish post: {}", e))
            }
        }
    }

    async fn try_publish(
        &self,
        request: &PostRequest,
        author: &str,
        permlink: &str,
    ) -> Result<String> {
        let operations = self.build_operations(request, author, permlink)?;
        debug!(author, permlink, operations = operations.len(), "Broadcasting post");

        let confirmation = self.client.broadcast(operations, &self.key).await?;
        Ok(confirmation.id)
    }

    /// The `comment` + `comment_options` pair for one post
    pub fn build_operations(
        &self,
        request: &PostRequest,
        author: &str,
        permlink: &str,
    ) -> Result<Vec<Operation>> {
        let parent_permlink = request
            .tags
            .first()
            .filter(|tag| !tag.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| self.publish.default_category.clone());

        let json_metadata = serde_json::to_string(&json!({
            "tags": request.tags,
            "app": self.publish.app,
            "format": "markdown",
        }))
        .map_err(|e| HivecastError::InvalidInput(format!("Unencodable metadata: {}", e)))?;

        let comment = CommentOperation {
            parent_author: String::new(),
            parent_permlink,
            author: author.to_string(),
            permlink: permlink.to_string(),
            title: request.title.clone(),
            body: request.content.clone(),
            json_metadata,
        };

        let options = CommentOptionsOperation {
            author: author.to_string(),
            permlink: permlink.to_string(),
            max_accepted_payout: Asset {
                amount: MAX_ACCEPTED_PAYOUT,
                precision: 3,
                symbol: AssetSymbol::Hbd,
            },
            percent_hbd: PERCENT_HBD,
            allow_votes: true,
            allow_curation_rewards: true,
            extensions: vec![CommentOptionsExtension::Beneficiaries {
                beneficiaries: vec![BeneficiaryRoute {
                    account: self.publish.beneficiary_account.clone(),
                    weight: self.publish.beneficiary_weight,
                }],
            }],
        };

        Ok(vec![
            Operation::Comment(comment),
            Operation::CommentOptions(options),
        ])
    }

    /// Look up an account, `None` if it does not exist or the lookup failed
    pub async fn get_account(&self, username: &str) -> Option<Account> {
        match self.client.get_accounts(&[username.to_string()]).await {
            Ok(accounts) => accounts.into_iter().next(),
            Err(e) => {
                error!(username, "Failed to fetch account: {}", e);
                None
            }
        }
    }

    /// Look up a post, `None` if it does not exist or the lookup failed
    pub async fn get_post(&self, author: &str, permlink: &str) -> Option<Content> {
        match self.client.get_content(author, permlink).await {
            Ok(content) if content.exists() => Some(content),
            Ok(_) => None,
            Err(e) => {
                error!(author, permlink, "Failed to fetch post: {}", e);
                None
            }
        }
    }

    /// Whether the held key is one of `username`'s posting keys
    pub async fn validate_posting_key(&self, username: &str) -> bool {
        let public_key = self.key.public_key().to_string();

        match self.get_account(username).await {
            Some(account) => {
                let valid = account.has_posting_key(&public_key);
                debug!(username, public_key = %public_key, valid, "Checked posting authority");
                valid
            }
            None => false,
        }
    }
}
