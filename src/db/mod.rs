//! Storage layer
//!
//! Data lives in process memory for the lifetime of the server. Access goes
//! through repository traits so services never touch the tables directly.
//!
//! # Usage
//!
//! ```ignore
//! use newsdesk::db::{create_store, repositories::MemoryNewsRepository};
//!
//! let store = create_store();
//! let news_repo = MemoryNewsRepository::boxed(store.clone());
//! ```

pub mod repositories;
pub mod store;

pub use store::{create_store, DynStore, MemoryStore};
