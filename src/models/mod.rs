//! Data models
//!
//! This module contains the data structures used throughout newsdesk:
//! - Store entities (User, News, Category)
//! - Input types for the services

mod category;
mod news;
mod user;

pub use category::{Category, CreateCategoryInput};
pub use news::{normalize_category, CreateNewsInput, News, NewsFilter, NewsStatus, UpdateNewsInput};
pub use user::User;
