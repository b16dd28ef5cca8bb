use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

struct PostTable {
    rows: BTreeMap<i64, Post>,
    next_id: i64,
}

/// In-memory post store with sequential ids starting at 1.
pub struct InMemoryPostRepository {
    table: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(PostTable {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        let mut posts: Vec<Post> = table
            .rows
            .values()
            .filter(|post| post.is_visible_at(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.published_date
                .cmp(&a.published_date)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let post = post.with_id(id);
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let row = table.rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        // created_date is set once
        let post = Post {
            created_date: row.created_date,
            ..post
        };
        *row = post.clone();
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn draft(title: &str, published: Option<DateTime<Utc>>) -> NewPost {
        let mut post = Post::draft(
            Uuid::new_v4(),
            title.to_string(),
            format!("Text {title}"),
            at(2015, 1, 1),
        );
        post.published_date = published;
        post
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();

        let first = repo.insert(draft("first", None)).await.unwrap();
        let second = repo.insert(draft("second", None)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_list_published_filters_and_orders() {
        let repo = InMemoryPostRepository::new();
        repo.insert(draft("future", Some(at(2018, 11, 8)))).await.unwrap();
        repo.insert(draft("old", Some(at(2016, 11, 8)))).await.unwrap();
        repo.insert(draft("draft", None)).await.unwrap();
        repo.insert(draft("newer", Some(at(2017, 5, 1)))).await.unwrap();

        let titles: Vec<String> = repo
            .list_published(at(2018, 1, 1))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["newer", "old"]);
    }

    #[tokio::test]
    async fn test_list_published_breaks_ties_by_id() {
        let repo = InMemoryPostRepository::new();
        let same = Some(at(2017, 1, 1));
        repo.insert(draft("a", same)).await.unwrap();
        repo.insert(draft("b", same)).await.unwrap();

        let ids: Vec<i64> = repo
            .list_published(at(2018, 1, 1))
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryPostRepository::new();
        let ghost = draft("ghost", None).with_id(42);

        let result = repo.update(ghost).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_keeps_created_date() {
        let repo = InMemoryPostRepository::new();
        let stored = repo.insert(draft("post", None)).await.unwrap();

        let changed = Post {
            title: "changed".to_string(),
            created_date: at(2020, 1, 1),
            ..stored.clone()
        };
        let updated = repo.update(changed).await.unwrap();

        assert_eq!(updated.title, "changed");
        assert_eq!(updated.created_date, stored.created_date);
    }
}
