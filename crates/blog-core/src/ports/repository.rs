use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{NewPost, Post, User};
use crate::error::RepoError;

/// Post storage. Exactly the reads and writes the blog needs.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts with a publish date at or before `now`, newest publish date first.
    /// Ties are ordered by descending id.
    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;

    /// Find a post by id, published or not.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Store a new post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite an existing post. Fails with `RepoError::NotFound` if the id is unknown.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Store a new user. Fails with `RepoError::Constraint` if the username is taken.
    async fn insert(&self, user: User) -> Result<User, RepoError>;
}
