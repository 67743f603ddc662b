use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use md5::{Digest, Md5};

pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// An article link found on the front page that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredArticle {
    pub title: String,
    pub url: String,
    pub author: String,
    pub date_posted: String,
    pub content_hash: String,
}

impl DiscoveredArticle {
    pub fn new(title: String, url: String) -> Self {
        let content_hash = Self::generate_hash(&title);
        Self {
            title,
            url,
            author: UNKNOWN_AUTHOR.to_string(),
            date_posted: today(),
            content_hash,
        }
    }

    /// MD5 hex of the title only, matching rows written by earlier tooling.
    /// Body changes are not reflected.
    pub fn generate_hash(title: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(title.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// A stored row of the `articles` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub author: String,
    pub date_posted: String,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub telegraph_url: Option<String>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.telegraph_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
