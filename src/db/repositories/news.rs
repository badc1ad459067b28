//! News repository
//!
//! This module provides:
//! - `NewsRepository` trait defining the interface for news data access
//! - `MemoryNewsRepository` implementing the trait over the in-memory store

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::DynStore;
use crate::models::{News, NewsFilter};

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a news item, assigning its id
    async fn create(&self, news: &News) -> Result<News>;

    /// Get news by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// List news matching the filter, newest first
    async fn list(&self, filter: &NewsFilter) -> Result<Vec<News>>;

    /// Overwrite the editable fields (title, content, category, status,
    /// updated_at) of an existing item. The view history is left alone.
    async fn update(&self, news: &News) -> Result<Option<News>>;

    /// Delete a news item; returns whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Append a view timestamp
    async fn record_view(&self, id: i64, at: DateTime<Utc>) -> Result<Option<News>>;

    /// Total number of news items
    async fn count(&self) -> Result<usize>;
}

/// In-memory news repository
pub struct MemoryNewsRepository {
    store: DynStore,
}

impl MemoryNewsRepository {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(store: DynStore) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(store))
    }
}

#[async_trait]
impl NewsRepository for MemoryNewsRepository {
    async fn create(&self, news: &News) -> Result<News> {
        let mut table = self.store.news.write().await;
        let mut created = news.clone();
        created.id = self.store.next_news_id();
        table.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        let table = self.store.news.read().await;
        Ok(table.iter().find(|n| n.id == id).cloned())
    }

    async fn list(&self, filter: &NewsFilter) -> Result<Vec<News>> {
        let table = self.store.news.read().await;
        let mut items: Vec<News> = table.iter().filter(|n| filter.matches(n)).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn update(&self, news: &News) -> Result<Option<News>> {
        let mut table = self.store.news.write().await;
        let Some(existing) = table.iter_mut().find(|n| n.id == news.id) else {
            return Ok(None);
        };
        existing.title = news.title.clone();
        existing.content = news.content.clone();
        existing.category = news.category.clone();
        existing.status = news.status;
        existing.updated_at = news.updated_at;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.store.news.write().await;
        let before = table.len();
        table.retain(|n| n.id != id);
        Ok(table.len() != before)
    }

    async fn record_view(&self, id: i64, at: DateTime<Utc>) -> Result<Option<News>> {
        let mut table = self.store.news.write().await;
        let Some(existing) = table.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        existing.views_history.push(at);
        Ok(Some(existing.clone()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.store.news.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_store;
    use crate::models::NewsStatus;
    use chrono::Duration;

    fn news(title: &str, status: NewsStatus) -> News {
        News::new(title.to_string(), "body".to_string(), None, status)
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = MemoryNewsRepository::new(create_store());
        let a = repo.create(&news("a", NewsStatus::Draft)).await.unwrap();
        let b = repo.create(&news("b", NewsStatus::Draft)).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let repo = Arc::new(MemoryNewsRepository::new(create_store()));

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(&news(&format!("n{}", i), NewsStatus::Draft))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids, (1..=50).collect::<Vec<i64>>());
        assert_eq!(repo.count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = MemoryNewsRepository::new(create_store());
        let a = repo.create(&news("a", NewsStatus::Draft)).await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());

        let b = repo.create(&news("b", NewsStatus::Draft)).await.unwrap();
        assert_eq!(b.id, 2);
        assert!(!repo.delete(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filter() {
        let repo = MemoryNewsRepository::new(create_store());
        let mut old = news("old", NewsStatus::Published);
        old.created_at = Utc::now() - Duration::days(2);
        repo.create(&old).await.unwrap();
        repo.create(&news("new", NewsStatus::Published)).await.unwrap();
        repo.create(&news("draft", NewsStatus::Draft)).await.unwrap();

        let published = repo.list(&NewsFilter::status(NewsStatus::Published)).await.unwrap();
        let titles: Vec<&str> = published.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);

        let all = repo.list(&NewsFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_view_history() {
        let repo = MemoryNewsRepository::new(create_store());
        let created = repo.create(&news("a", NewsStatus::Draft)).await.unwrap();

        let stale = created.clone();
        repo.record_view(created.id, Utc::now()).await.unwrap();

        let mut edited = stale;
        edited.title = "edited".into();
        let updated = repo.update(&edited).await.unwrap().unwrap();

        assert_eq!(updated.title, "edited");
        assert_eq!(updated.views_history.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = MemoryNewsRepository::new(create_store());
        let mut ghost = news("ghost", NewsStatus::Draft);
        ghost.id = 42;

        assert!(repo.get_by_id(42).await.unwrap().is_none());
        assert!(repo.update(&ghost).await.unwrap().is_none());
        assert!(repo.record_view(42, Utc::now()).await.unwrap().is_none());
    }
}
