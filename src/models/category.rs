//! Category model
//!
//! Categories are a flat list of names. News items reference a category by
//! name only; nothing ties the two together.

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

impl Category {
    /// Create a new Category.
    ///
    /// The ID will be set to 0 and assigned by the store.
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }

    /// Case-insensitive name comparison used for duplicate detection
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Input for creating a new category
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    /// Category name (trimmed before storing)
    #[serde(default)]
    pub name: String,
}

impl CreateCategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new() {
        let category = Category::new("Politics".to_string());
        assert_eq!(category.id, 0);
        assert_eq!(category.name, "Politics");
    }

    #[test]
    fn test_has_name_ignores_case_and_padding() {
        let category = Category::new("Politics".to_string());
        assert!(category.has_name("politics"));
        assert!(category.has_name("  POLITICS "));
        assert!(!category.has_name("Sports"));
    }
}
