//! News model
//!
//! This module provides:
//! - `News` entity representing a news article
//! - `NewsStatus` enum for the draft/publish workflow
//! - Input types for creating and updating news
//! - `NewsFilter` for list queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// News entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct News {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Category name (not checked against the category list)
    pub category: Option<String>,
    /// Publication status
    pub status: NewsStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// One timestamp per recorded view, oldest first
    #[serde(default)]
    pub views_history: Vec<DateTime<Utc>>,
}

impl News {
    /// Create a new news item stamped with the current time
    pub fn new(
        title: String,
        content: String,
        category: Option<String>,
        status: NewsStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the store
            title,
            content,
            category,
            status,
            created_at: now,
            updated_at: now,
            views_history: Vec::new(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published
    }

    pub fn is_draft(&self) -> bool {
        self.status == NewsStatus::Draft
    }

    /// Total number of recorded views
    pub fn view_count(&self) -> usize {
        self.views_history.len()
    }

    /// Case-insensitive search over title and content
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }

    /// Apply an update, leaving unset fields untouched
    pub fn apply(&mut self, input: UpdateNewsInput) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(content) = input.content {
            self.content = content;
        }
        if let Some(category) = input.category {
            self.category = normalize_category(category);
        }
        if let Some(status) = input.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Blank category names are stored as "no category"
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// News publication status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    /// Draft - saved but not published
    #[default]
    Draft,
    /// Published
    Published,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Draft => "draft",
            NewsStatus::Published => "published",
        }
    }

    /// Parse status from its wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(NewsStatus::Draft),
            "published" => Some(NewsStatus::Published),
            _ => None,
        }
    }
}

impl std::fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for creating a news item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNewsInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Defaults to draft
    #[serde(default)]
    pub status: Option<NewsStatus>,
}

impl CreateNewsInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: None,
            status: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: NewsStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Input for updating an existing news item
///
/// `category` distinguishes "absent" (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNewsInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<NewsStatus>,
}

impl UpdateNewsInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: NewsStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || self.category.is_some()
            || self.status.is_some()
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Filters for listing news
#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    pub status: Option<NewsStatus>,
    pub query: Option<String>,
}

impl NewsFilter {
    pub fn status(status: NewsStatus) -> Self {
        Self {
            status: Some(status),
            query: None,
        }
    }

    pub fn matches(&self, news: &News) -> bool {
        if let Some(status) = self.status {
            if news.status != status {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => news.matches_query(q),
            _ => true,
        }
    }
}
