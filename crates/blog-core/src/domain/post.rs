use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry that becomes public once published.
///
/// A `published_date` of `None` marks a draft. A post is listed only when its
/// publish date is set and not in the future, see [`Post::is_visible_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

/// A post that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Create an unsaved draft authored by `author_id`.
    pub fn draft(author_id: Uuid, title: String, text: String, now: DateTime<Utc>) -> NewPost {
        NewPost {
            author_id,
            title,
            text,
            created_date: now,
            published_date: None,
        }
    }

    /// Mark the post as published at `now`. Repeated calls move the date forward.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published_date = Some(now);
    }

    /// Whether the post belongs in the public list at `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.published_date.is_some_and(|published| published <= now)
    }
}

impl NewPost {
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published_date = Some(now);
    }

    /// Attach the storage-assigned id.
    pub fn with_id(self, id: i64) -> Post {
        Post {
            id,
            author_id: self.author_id,
            title: self.title,
            text: self.text,
            created_date: self.created_date,
            published_date: self.published_date,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
