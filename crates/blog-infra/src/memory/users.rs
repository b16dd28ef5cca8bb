use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::User;
use blog_core::error::RepoError;
use blog_core::ports::UserRepository;

/// In-memory user store keyed by id.
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryUserRepository::new();
        let bob = repo
            .insert(User::new("bob".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let by_name = repo.find_by_username("bob").await.unwrap().unwrap();
        let by_id = repo.find_by_id(bob.id).await.unwrap().unwrap();

        assert_eq!(by_name.id, bob.id);
        assert_eq!(by_id.username, "bob");
        assert!(repo.find_by_username("john").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("bob".to_string(), "a".to_string()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("bob".to_string(), "b".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
