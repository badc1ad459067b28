//! Newsdesk - A lightweight news management backend
//!
//! This library provides the core functionality for the newsdesk dashboard:
//! accounts, news with a draft/publish workflow, categories, view tracking
//! and dashboard metrics.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
