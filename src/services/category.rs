//! Category service
//!
//! Implements business logic for category management:
//! - Create, list, delete categories
//! - Name validation and case-insensitive uniqueness
//! - Cached category list, invalidated on every write
//!
//! Deleting a category never touches news items that name it.

use crate::cache::{Cache, CacheLayer};
use crate::db::repositories::CategoryRepository;
use crate::models::{Category, CreateCategoryInput};
use anyhow::Context;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default cache TTL for the category list
const CATEGORY_CACHE_TTL_SECS: u64 = 300;

const CACHE_KEY_CATEGORY_LIST: &str = "category:list";

/// Error types for category service operations
#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    /// Category name already exists
    #[error("Category already exists: {0}")]
    DuplicateName(String),

    /// Category not found
    #[error("Category not found: {0}")]
    NotFound(i64),

    /// Validation error
    #[error("{0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Category service
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    cache: Arc<Cache>,
    cache_ttl: Duration,
    /// Bumped by every write; see `list`
    generation: AtomicU64,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>, cache: Arc<Cache>) -> Self {
        Self {
            repo,
            cache,
            cache_ttl: Duration::from_secs(CATEGORY_CACHE_TTL_SECS),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a new category
    ///
    /// # Errors
    /// - `ValidationError` if the trimmed name is empty
    /// - `DuplicateName` if a category with the same name exists (case-insensitive)
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> Result<Category, CategoryServiceError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(CategoryServiceError::ValidationError(
                "Category name is required".to_string(),
            ));
        }

        let created = self
            .repo
            .create(&Category::new(name.clone()))
            .await
            .context("Failed to create category")?
            .ok_or(CategoryServiceError::DuplicateName(name))?;

        self.invalidate_cache().await;
        tracing::info!(id = created.id, name = %created.name, "Category created");

        Ok(created)
    }

    /// List all categories ordered by id
    ///
    /// The snapshot is cached only if no write ran while it was read.
    pub async fn list(&self) -> Result<Vec<Category>, CategoryServiceError> {
        if let Some(list) = self
            .cache
            .get::<Vec<Category>>(CACHE_KEY_CATEGORY_LIST)
            .await
            .ok()
            .flatten()
        {
            return Ok(list);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let list = self.repo.list().await.context("Failed to list categories")?;

        if self.generation.load(Ordering::Acquire) == generation {
            let _ = self.cache.set(CACHE_KEY_CATEGORY_LIST, &list, self.cache_ttl).await;
            if self.generation.load(Ordering::Acquire) != generation {
                let _ = self.cache.delete(CACHE_KEY_CATEGORY_LIST).await;
            }
        }

        Ok(list)
    }

    /// Get category by ID
    pub async fn get_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Category>, CategoryServiceError> {
        Ok(self.repo.get_by_id(id).await.context("Failed to get category")?)
    }

    /// Delete a category
    ///
    /// # Errors
    /// - `NotFound` if the category doesn't exist
    pub async fn delete(&self, id: i64) -> Result<(), CategoryServiceError> {
        let deleted = self.repo.delete(id).await.context("Failed to delete category")?;
        if !deleted {
            return Err(CategoryServiceError::NotFound(id));
        }

        self.invalidate_cache().await;
        tracing::info!(id, "Category deleted");

        Ok(())
    }

    /// Number of categories
    pub async fn count(&self) -> Result<usize, CategoryServiceError> {
        Ok(self.repo.count().await.context("Failed to count categories")?)
    }

    /// Create each named category unless it exists; returns how many were added
    pub async fn seed(&self, names: &[String]) -> Result<usize, CategoryServiceError> {
        let mut added = 0;
        for name in names {
            match self.create(CreateCategoryInput::new(name.clone())).await {
                Ok(_) => added += 1,
                Err(CategoryServiceError::DuplicateName(_)) => {}
                Err(CategoryServiceError::ValidationError(msg)) => {
                    tracing::warn!("Skipping seed category {:?}: {}", name, msg);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    async fn invalidate_cache(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let _ = self.cache.delete(CACHE_KEY_CATEGORY_LIST).await;
    }
}
