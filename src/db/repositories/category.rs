//! Category repository
//!
//! This module provides:
//! - `CategoryRepository` trait defining the interface for category data access
//! - `MemoryCategoryRepository` implementing the trait over the in-memory store

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::DynStore;
use crate::models::Category;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category unless the name is taken (case-insensitive).
    ///
    /// Returns `None` on a duplicate name.
    async fn create(&self, category: &Category) -> Result<Option<Category>>;

    /// Get category by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// List all categories ordered by id
    async fn list(&self) -> Result<Vec<Category>>;

    /// Delete a category; returns whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Number of categories
    async fn count(&self) -> Result<usize>;
}

/// In-memory category repository
pub struct MemoryCategoryRepository {
    store: DynStore,
}

impl MemoryCategoryRepository {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(store: DynStore) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::new(store))
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Option<Category>> {
        let mut table = self.store.categories.write().await;
        if table.iter().any(|c| c.has_name(&category.name)) {
            return Ok(None);
        }
        let mut created = category.clone();
        created.id = self.store.next_category_id();
        table.push(created.clone());
        Ok(Some(created))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let table = self.store.categories.read().await;
        Ok(table.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>> {
        // Ids are assigned in insertion order, so the table is already sorted.
        Ok(self.store.categories.read().await.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.store.categories.write().await;
        let before = table.len();
        table.retain(|c| c.id != id);
        Ok(table.len() != before)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.store.categories.read().await.len())
    }
}
