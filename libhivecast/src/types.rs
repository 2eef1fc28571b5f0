//! Core types for Hivecast

use hive_rs::types::Authority;
use serde::{Deserialize, Serialize};

/// A blog post to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Publishing account; empty means the service's own account
    pub author: String,
}

impl PostRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            author: author.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Outcome of a publish attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    pub success: bool,
    /// Broadcast transaction id
    pub post_id: Option<String>,
    pub permlink: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl PostResult {
    pub fn published(post_id: String, permlink: String, url: String) -> Self {
        Self {
            success: true,
            post_id: Some(post_id),
            permlink: Some(permlink),
            url: Some(url),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            post_id: None,
            permlink: None,
            url: None,
            error: Some(error),
        }
    }
}

/// An account record as returned by `condenser_api.get_accounts`
///
/// Only the fields the service reads are typed; the rest pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub posting: Authority,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Account {
    /// Whether `public_key` (`STM...`) is listed in the posting authority
    pub fn has_posting_key(&self, public_key: &str) -> bool {
        self.posting.key_auths.iter().any(|(key, _)| key == public_key)
    }
}

/// A post or comment as returned by `condenser_api.get_content`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub permlink: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Content {
    /// Nodes answer lookups of missing posts with a blank record
    pub fn exists(&self) -> bool {
        !self.author.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_keeps_untyped_fields() {
        let account: Account = serde_json::from_value(json!({
            "id": 42,
            "name": "alice",
            "posting": {
                "weight_threshold": 1,
                "account_auths": [["peakd.app", 1]],
                "key_auths": [["STM6abc", 1]]
            },
            "memo_key": "STM7memo",
            "balance": "1.000 HIVE"
        }))
        .unwrap();

        assert_eq!(account.name, "alice");
        assert!(account.has_posting_key("STM6abc"));
        assert!(!account.has_posting_key("STM7memo"));
        assert_eq!(account.posting.account_auths[0].0, "peakd.app");
        assert_eq!(account.extra["memo_key"], "STM7memo");
        assert_eq!(account.extra["id"], 42);

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["balance"], "1.000 HIVE");
    }

    #[test]
    fn test_blank_content_does_not_exist() {
        let blank: Content = serde_json::from_value(json!({
            "id": 0,
            "author": "",
            "permlink": "",
            "body": ""
        }))
        .unwrap();
        assert!(!blank.exists());

        let post: Content = serde_json::from_value(json!({
            "author": "alice",
            "permlink": "hello",
            "title": "Hello",
            "body": "World",
            "category": "hive",
            "net_votes": 3
        }))
        .unwrap();
        assert!(post.exists());
        assert_eq!(post.extra["net_votes"], 3);
    }

    #[test]
    fn test_post_request_builder() {
        let request = PostRequest::new("Title", "Body", "alice").with_tags(["rust", "hive"]);
        assert_eq!(request.tags, vec!["rust".to_string(), "hive".to_string()]);
        assert_eq!(request.author, "alice");
    }

    #[test]
    fn test_post_result_constructors() {
        let ok = PostResult::published("tx".into(), "p".into(), "https://hive.blog/@a/p".into());
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed = PostResult::failed("boom".into());
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("boom"));
        assert!(failed.url.is_none());
    }
}
