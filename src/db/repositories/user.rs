//! User repository
//!
//! This module provides:
//! - `UserRepository` trait defining the interface for user data access
//! - `MemoryUserRepository` implementing the trait over the in-memory store

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::DynStore;
use crate::models::User;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user unless the email is already taken.
    ///
    /// Returns `None` when a user with the same email exists.
    async fn create(&self, user: &User) -> Result<Option<User>>;

    /// Get user by exact email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Number of registered users
    async fn count(&self) -> Result<usize>;
}

/// In-memory user repository
pub struct MemoryUserRepository {
    store: DynStore,
}

impl MemoryUserRepository {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(store: DynStore) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(store))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<Option<User>> {
        let mut users = self.store.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        users.push(user.clone());
        Ok(Some(user.clone()))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.store.users.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_store;

    #[tokio::test]
    async fn test_create_and_get_by_email() {
        let repo = MemoryUserRepository::new(create_store());
        let user = User::new("a@example.com".into(), "hash".into());

        let created = repo.create(&user).await.unwrap();
        assert!(created.is_some());

        let found = repo.get_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash");
        assert!(repo.get_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MemoryUserRepository::new(create_store());
        repo.create(&User::new("a@example.com".into(), "h1".into())).await.unwrap();

        let second = repo.create(&User::new("a@example.com".into(), "h2".into())).await.unwrap();
        assert!(second.is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
