//! In-memory store
//!
//! Holds the three tables (users, news, categories) behind async read/write
//! locks. Every mutation takes the table's write lock, so concurrent writers
//! are serialised. Ids come from per-table sequences and are never reused.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Category, News, User};

/// Shared handle to the store
pub type DynStore = Arc<MemoryStore>;

/// In-memory tables shared by the repositories
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) news: RwLock<Vec<News>>,
    pub(crate) categories: RwLock<Vec<Category>>,
    news_seq: AtomicI64,
    category_seq: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next news id, starting at 1
    pub(crate) fn next_news_id(&self) -> i64 {
        self.news_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Next category id, starting at 1
    pub(crate) fn next_category_id(&self) -> i64 {
        self.category_seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Create an empty store
pub fn create_store() -> DynStore {
    Arc::new(MemoryStore::new())
}
