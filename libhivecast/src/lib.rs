//! Hivecast - publish blog posts to the Hive blockchain
//!
//! This library wraps a Hive node behind a small facade: publish a post,
//! look up accounts and posts, and check that a posting key belongs to an
//! account.

pub mod chain;
pub mod config;
pub mod error;
pub mod keys;
pub mod logging;
pub mod permlink;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use chain::HiveClient;
pub use config::Config;
pub use error::{HivecastError, Result};
pub use keys::{PrivateKey, PublicKey};
pub use service::HiveService;
pub use types::{Account, Content, PostRequest, PostResult};
