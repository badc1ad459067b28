//! Repositories
//!
//! Repository pattern implementations over the in-memory store.
//! Each repository handles CRUD operations for a specific entity.

pub mod category;
pub mod news;
pub mod user;

pub use category::{CategoryRepository, MemoryCategoryRepository};
pub use news::{MemoryNewsRepository, NewsRepository};
pub use user::{MemoryUserRepository, UserRepository};
