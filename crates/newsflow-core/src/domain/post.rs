//! Post records and the store-assigned post identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Identifier of a Post, assigned by the store on creation.
///
/// The store owns id allocation (the record key *is* the id), so this is
/// an opaque string wrapper rather than a structured id. The in-memory
/// adapter happens to hand out ULIDs, the realtime backend hands out its
/// own push keys; callers must not assume either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted article.
///
/// Posts are write-once: constructed by the authoring flow, written to
/// the store, and thereafter only read. There is no edit or delete path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub category: Category,
    pub image_url: String,
    /// Rich formatted body. Rendered verbatim by readers, never re-escaped.
    pub content: String,
    /// Plain-text summary derived at creation time (see `domain::excerpt`).
    pub excerpt: String,
    /// Creation instant in milliseconds since epoch. Sort key and display value.
    pub timestamp: i64,
}

impl Post {
    /// Re-attach the store-assigned id to a record read back from the store.
    pub fn from_record(id: PostId, record: PostRecord) -> Self {
        Self {
            id,
            title: record.title,
            category: record.category,
            image_url: record.image_url,
            content: record.content,
            excerpt: record.excerpt,
            timestamp: record.timestamp,
        }
    }
}

/// The wire shape of a Post minus its id.
///
/// This is what `PostStore::create` accepts and what the store keeps under
/// each key. Field names follow the store's camelCase convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub title: String,
    pub category: Category,
    pub image_url: String,
    pub content: String,
    pub excerpt: String,
    pub timestamp: i64,
}

/// Sort posts newest first.
///
/// `sort_by` is stable, so posts with equal timestamps keep their
/// relative order from the input.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
