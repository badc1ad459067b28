//! Services layer - Business logic
//!
//! This module contains the business logic services for the newsdesk backend.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories and cache
//! - Handling validation and error cases

pub mod category;
pub mod metrics;
pub mod news;
pub mod password;
pub mod user;

pub use category::{CategoryService, CategoryServiceError};
pub use metrics::{
    compute as compute_dashboard, Dashboard, DashboardMetrics, DashboardStats, TimeRange,
};
pub use news::{NewsService, NewsServiceError};
pub use password::{hash_password, verify_password};
pub use user::{LoginInput, LoginOutcome, RegisterInput, UserService, UserServiceError};
