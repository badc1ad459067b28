//! News service
//!
//! Implements business logic for news management:
//! - Create, read, update, delete news items
//! - Draft/publish workflow
//! - View recording
//! - Cached unfiltered list, invalidated on every write

use crate::cache::{Cache, CacheLayer};
use crate::db::repositories::NewsRepository;
use crate::models::{
    normalize_category, CreateNewsInput, News, NewsFilter, NewsStatus, UpdateNewsInput,
};
use anyhow::Context;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default cache TTL for the news list
const NEWS_CACHE_TTL_SECS: u64 = 60;

const CACHE_KEY_NEWS_LIST: &str = "news:list";

/// Error types for news service operations
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    /// News not found
    #[error("News not found: {0}")]
    NotFound(i64),

    /// Validation error
    #[error("{0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// News service
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
    cache: Arc<Cache>,
    cache_ttl: Duration,
    /// Bumped by every write; a list snapshot is only cached if no write
    /// happened while it was being read.
    generation: AtomicU64,
}

impl NewsService {
    pub fn new(repo: Arc<dyn NewsRepository>, cache: Arc<Cache>) -> Self {
        Self {
            repo,
            cache,
            cache_ttl: Duration::from_secs(NEWS_CACHE_TTL_SECS),
            generation: AtomicU64::new(0),
        }
    }

    /// List news matching the filter, newest first
    pub async fn list(&self, filter: &NewsFilter) -> Result<Vec<News>, NewsServiceError> {
        let unfiltered = filter.status.is_none()
            && filter.query.as_deref().map_or(true, |q| q.trim().is_empty());

        if !unfiltered {
            return Ok(self.repo.list(filter).await.context("Failed to list news")?);
        }

        if let Some(list) = self
            .cache
            .get::<Vec<News>>(CACHE_KEY_NEWS_LIST)
            .await
            .ok()
            .flatten()
        {
            return Ok(list);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let list = self.repo.list(filter).await.context("Failed to list news")?;

        if self.generation.load(Ordering::Acquire) == generation {
            let _ = self.cache.set(CACHE_KEY_NEWS_LIST, &list, self.cache_ttl).await;
            // A write that landed between the check and the set must not
            // leave this snapshot behind.
            if self.generation.load(Ordering::Acquire) != generation {
                let _ = self.cache.delete(CACHE_KEY_NEWS_LIST).await;
            }
        }

        Ok(list)
    }

    /// Get a news item by ID
    pub async fn get(&self, id: i64) -> Result<News, NewsServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get news")?
            .ok_or(NewsServiceError::NotFound(id))
    }

    /// Create a news item
    ///
    /// Status defaults to draft. A draft needs a title; publishing also needs content.
    pub async fn create(&self, input: CreateNewsInput) -> Result<News, NewsServiceError> {
        let news = News::new(
            input.title.trim().to_string(),
            input.content,
            normalize_category(input.category),
            input.status.unwrap_or_default(),
        );
        validate(&news)?;

        let created = self.repo.create(&news).await.context("Failed to create news")?;

        self.invalidate_cache().await;
        tracing::info!(id = created.id, status = %created.status, "News created");

        Ok(created)
    }

    /// Update a news item; unset fields are kept
    ///
    /// # Errors
    /// - `NotFound` if the item doesn't exist
    /// - `ValidationError` if the resulting item is invalid
    pub async fn update(
        &self,
        id: i64,
        input: UpdateNewsInput,
    ) -> Result<News, NewsServiceError> {
        let mut news = self.get(id).await?;
        if !input.has_changes() {
            return Ok(news);
        }

        let input = UpdateNewsInput {
            title: input.title.map(|t| t.trim().to_string()),
            ..input
        };
        news.apply(input);
        validate(&news)?;

        let updated = self
            .repo
            .update(&news)
            .await
            .context("Failed to update news")?
            .ok_or(NewsServiceError::NotFound(id))?;

        self.invalidate_cache().await;
        tracing::info!(id, status = %updated.status, "News updated");

        Ok(updated)
    }

    /// Publish a draft
    pub async fn publish(&self, id: i64) -> Result<News, NewsServiceError> {
        self.update(id, UpdateNewsInput::new().with_status(NewsStatus::Published)).await
    }

    /// Move a published item back to drafts
    pub async fn unpublish(&self, id: i64) -> Result<News, NewsServiceError> {
        self.update(id, UpdateNewsInput::new().with_status(NewsStatus::Draft)).await
    }

    /// Delete a news item
    pub async fn delete(&self, id: i64) -> Result<(), NewsServiceError> {
        let deleted = self.repo.delete(id).await.context("Failed to delete news")?;
        if !deleted {
            return Err(NewsServiceError::NotFound(id));
        }

        self.invalidate_cache().await;
        tracing::info!(id, "News deleted");

        Ok(())
    }

    /// Record one view at the current time
    pub async fn record_view(&self, id: i64) -> Result<News, NewsServiceError> {
        let news = self
            .repo
            .record_view(id, Utc::now())
            .await
            .context("Failed to record view")?
            .ok_or(NewsServiceError::NotFound(id))?;

        self.invalidate_cache().await;
        tracing::debug!(id, views = news.view_count(), "View recorded");

        Ok(news)
    }

    /// Total number of news items
    pub async fn count(&self) -> Result<usize, NewsServiceError> {
        Ok(self.repo.count().await.context("Failed to count news")?)
    }

    async fn invalidate_cache(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let _ = self.cache.delete_pattern("news:*").await;
    }
}

fn validate(news: &News) -> Result<(), NewsServiceError> {
    if news.title.trim().is_empty() {
        return Err(NewsServiceError::ValidationError("Title is required".to_string()));
    }
    if news.is_published() && news.content.trim().is_empty() {
        return Err(NewsServiceError::ValidationError(
            "Content is required to publish".to_string(),
        ));
    }
    Ok(())
}
