//! Dashboard metrics
//!
//! Pure computation over a snapshot of the news list. The handler supplies
//! `now` so results are reproducible in tests.

use crate::models::News;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Engagement points credited per published item in range
const ENGAGEMENT_PER_PUBLISHED: usize = 150;

/// Number of items in the "recent" list
const RECENT_LIMIT: usize = 3;

/// Reporting window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Today,
    Week,
    Month,
}

impl TimeRange {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "today" => Some(TimeRange::Today),
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Today => "today",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
        }
    }

    /// Number of calendar days covered, including today
    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Today => 1,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
        }
    }

    /// UTC midnight at the start of the window ending at `now`
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let first_day = (now - Duration::days(self.days() - 1)).date_naive();
        Utc.from_utc_datetime(&first_day.and_time(NaiveTime::default()))
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All-time totals, ignoring range and search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_news: usize,
    pub published_news: usize,
    pub draft_news: usize,
    pub categories: usize,
}

/// Figures for the selected range and search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub views: usize,
    pub engagement: usize,
    pub avg_per_news: usize,
    pub active_editors: usize,
    pub total_in_range: usize,
    pub published_in_range: usize,
    pub draft_in_range: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub range: TimeRange,
    pub stats: DashboardStats,
    pub metrics: DashboardMetrics,
    pub recent: Vec<News>,
}

/// Build the dashboard for `news` as seen at `now`
pub fn compute(
    news: &[News],
    categories: usize,
    range: TimeRange,
    query: Option<&str>,
    now: DateTime<Utc>,
) -> Dashboard {
    let stats = DashboardStats {
        total_news: news.len(),
        published_news: news.iter().filter(|n| n.is_published()).count(),
        draft_news: news.iter().filter(|n| n.is_draft()).count(),
        categories,
    };

    let filtered: Vec<&News> = match query.map(str::trim) {
        Some(q) if !q.is_empty() => news.iter().filter(|n| n.matches_query(q)).collect(),
        _ => news.iter().collect(),
    };

    let start = range.start(now);
    let in_range = |ts: &DateTime<Utc>| *ts >= start && *ts <= now;

    let news_in_range: Vec<&News> = filtered
        .iter()
        .copied()
        .filter(|n| in_range(&n.created_at) || n.views_history.iter().any(|ts| in_range(ts)))
        .collect();

    let views: usize = news_in_range
        .iter()
        .map(|n| n.views_history.iter().filter(|&ts| in_range(ts)).count())
        .sum();
    let published = news_in_range.iter().filter(|n| n.is_published()).count();
    let draft = news_in_range.iter().filter(|n| n.is_draft()).count();
    let total = news_in_range.len();

    let metrics = DashboardMetrics {
        views,
        engagement: published * ENGAGEMENT_PER_PUBLISHED,
        avg_per_news: rounded_ratio(views, total),
        active_editors: (published / 3).max(1),
        total_in_range: total,
        published_in_range: published,
        draft_in_range: draft,
    };

    let mut recent = filtered;
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    let recent = recent.into_iter().take(RECENT_LIMIT).cloned().collect();

    Dashboard {
        range,
        stats,
        metrics,
        recent,
    }
}

/// `num / den` rounded half up; 0 when `den` is 0
fn rounded_ratio(num: usize, den: usize) -> usize {
    if den == 0 {
        0
    } else {
        (2 * num + den) / (2 * den)
    }
}
