//! Application services - the operations behind each view.

use std::sync::Arc;

use crate::domain::{Post, Principal};
use crate::error::{DomainError, RepoError};
use crate::forms::PostForm;
use crate::policy::authorize_write;
use crate::ports::{Clock, PostRepository};

/// Post lifecycle: listing, lookup, creation, editing and publishing.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }

    /// Published posts visible right now, newest first.
    pub async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        let now = self.clock.now();
        Ok(self.posts.list_published(now).await?)
    }

    /// Look up any post by id. Drafts are reachable here too.
    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Stamp the post with the current time and persist it.
    pub async fn publish(&self, id: i64) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        post.publish(self.clock.now());

        let post = self.update(post).await?;
        tracing::info!(post_id = post.id, "Post published");
        Ok(post)
    }

    /// Create a post authored by `principal` and publish it immediately.
    pub async fn create(
        &self,
        principal: Option<&Principal>,
        form: &PostForm,
    ) -> Result<Post, DomainError> {
        let author = authorize_write(principal)?;
        let valid = form.validate().map_err(DomainError::Validation)?;

        let now = self.clock.now();
        let mut draft = Post::draft(author.user_id, valid.title, valid.text, now);
        draft.publish(now);

        let post = self.posts.insert(draft).await?;
        tracing::info!(post_id = post.id, author = %author.username, "Post created");
        Ok(post)
    }

    /// The edit form, pre-populated from the stored post.
    pub async fn edit_form(&self, id: i64) -> Result<PostForm, DomainError> {
        let post = self.get(id).await?;
        Ok(PostForm::from(&post))
    }

    /// Rewrite title and text. The editor becomes the author and the post is
    /// re-published at the current time.
    pub async fn edit(
        &self,
        principal: Option<&Principal>,
        id: i64,
        form: &PostForm,
    ) -> Result<Post, DomainError> {
        let editor = authorize_write(principal)?;
        let mut post = self.get(id).await?;
        let valid = form.validate().map_err(DomainError::Validation)?;

        post.title = valid.title;
        post.text = valid.text;
        post.author_id = editor.user_id;
        post.publish(self.clock.now());

        let post = self.update(post).await?;
        tracing::info!(post_id = post.id, editor = %editor.username, "Post edited");
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, DomainError> {
        let id = post.id;
        self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })
    }
}
