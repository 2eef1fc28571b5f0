//! Hive chain access
//!
//! [`HiveClient`] is the seam between the publishing service and the chain.
//! [`rpc::RpcClient`] adapts `hive_rs::Client` to it; [`mock::MockHiveClient`]
//! keeps everything in memory for tests.
//!
//! # Examples
//!
//! ```no_run
//! use libhivecast::chain::{rpc::RpcClient, HiveClient};
//!
//! # async fn example() -> libhivecast::error::Result<()> {
//! let client = RpcClient::new("https://api.hive.blog", std::time::Duration::from_secs(30))?;
//!
//! let accounts = client.get_accounts(&["alice".to_string()]).await?;
//! if let Some(account) = accounts.first() {
//!     println!("{} has {} posting keys", account.name, account.posting.key_auths.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::keys::PrivateKey;
use crate::types::{Account, Content};

pub mod rpc;

// Mock client is available for all builds (not just tests) to support integration tests
pub mod mock;

pub use hive_rs::types::{
    Asset, AssetSymbol, BeneficiaryRoute, CommentOperation, CommentOptionsExtension,
    CommentOptionsOperation, Operation, TransactionConfirmation,
};

/// Read and write access to a Hive node
#[async_trait]
pub trait HiveClient: Send + Sync {
    /// Look up accounts by name
    ///
    /// Unknown names are omitted from the result rather than reported as errors.
    async fn get_accounts(&self, names: &[String]) -> Result<Vec<Account>>;

    /// Fetch a post or comment
    ///
    /// A missing post comes back as a blank record; see [`Content::exists`].
    async fn get_content(&self, author: &str, permlink: &str) -> Result<Content>;

    /// Sign `operations` with `key` and broadcast them as one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be built or signed, the node
    /// cannot be reached, or the node rejects or expires the transaction.
    async fn broadcast(
        &self,
        operations: Vec<Operation>,
        key: &PrivateKey,
    ) -> Result<TransactionConfirmation>;
}
