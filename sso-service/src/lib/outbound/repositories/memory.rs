use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppStore;
use crate::domain::auth::ports::UserStore;

#[derive(Debug, Default)]
struct Users {
    last_id: i64,
    by_id: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// User store kept in process memory.
///
/// Ids are assigned sequentially from 1. The uniqueness check and the insert
/// happen under one write lock, so concurrent registrations of the same
/// email produce exactly one user.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Users>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag an existing user as admin.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    pub async fn grant_admin(&self, user_id: UserId) -> Result<(), StorageError> {
        let mut users = self.users.write().await;
        let user = users
            .by_id
            .get_mut(&user_id)
            .ok_or(StorageError::UserNotFound)?;
        user.is_admin = true;
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn save(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError> {
        let mut users = self.users.write().await;

        if users.by_email.contains_key(email) {
            return Err(StorageError::UserExists);
        }

        users.last_id += 1;
        let id = UserId(users.last_id);
        users.by_email.insert(email.to_string(), id);
        users.by_id.insert(
            id,
            User {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_vec(),
                is_admin: false,
            },
        );

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StorageError> {
        let users = self.users.read().await;

        users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned()
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        self.users
            .read()
            .await
            .by_id
            .get(&user_id)
            .map(|user| user.is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

/// Application store kept in process memory, seeded at startup.
#[derive(Debug, Default)]
pub struct InMemoryAppStore {
    apps: RwLock<HashMap<AppId, App>>,
}

impl InMemoryAppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an application.
    pub async fn upsert(&self, app: App) {
        self.apps.write().await.insert(app.id, app);
    }
}

#[async_trait]
impl AppStore for InMemoryAppStore {
    async fn find_by_id(&self, app_id: AppId) -> Result<App, StorageError> {
        self.apps
            .read()
            .await
            .get(&app_id)
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();

        let first = store.save("a@example.com", b"hash-a").await.unwrap();
        let second = store.save("b@example.com", b"hash-b").await.unwrap();

        assert_eq!(first, UserId(1));
        assert_eq!(second, UserId(2));
    }

    #[tokio::test]
    async fn test_save_duplicate_email() {
        let store = InMemoryUserStore::new();

        store.save("a@example.com", b"hash").await.unwrap();
        let result = store.save("a@example.com", b"other-hash").await;

        assert_eq!(result, Err(StorageError::UserExists));
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let store = InMemoryUserStore::new();

        store.save("Alice@example.com", b"hash").await.unwrap();

        assert!(store.save("alice@example.com", b"hash").await.is_ok());
        assert_eq!(
            store.find_by_email("ALICE@example.com").await,
            Err(StorageError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = InMemoryUserStore::new();
        let id = store.save("a@example.com", b"hash").await.unwrap();

        let user = store.find_by_email("a@example.com").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.password_hash, b"hash".to_vec());
        assert!(!user.is_admin);

        assert_eq!(
            store.find_by_email("missing@example.com").await,
            Err(StorageError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_is_admin_and_grant() {
        let store = InMemoryUserStore::new();
        let id = store.save("a@example.com", b"hash").await.unwrap();

        assert_eq!(store.is_admin(id).await, Ok(false));
        store.grant_admin(id).await.unwrap();
        assert_eq!(store.is_admin(id).await, Ok(true));

        assert_eq!(
            store.is_admin(UserId(99)).await,
            Err(StorageError::UserNotFound)
        );
        assert_eq!(
            store.grant_admin(UserId(99)).await,
            Err(StorageError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration_creates_one_user() {
        let store = Arc::new(InMemoryUserStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.save("race@example.com", b"hash").await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_app_store_lookup() {
        let store = InMemoryAppStore::new();
        store
            .upsert(App {
                id: AppId(1),
                name: "test".to_string(),
                secret: b"test-secret".to_vec(),
            })
            .await;

        let app = store.find_by_id(AppId(1)).await.unwrap();
        assert_eq!(app.name, "test");
        assert_eq!(app.secret, b"test-secret".to_vec());

        assert_eq!(
            store.find_by_id(AppId(999)).await,
            Err(StorageError::AppNotFound)
        );
    }
}
