//! Category and Subcategory models
//!
//! Categories form a one-level tree: each category owns an ordered list of
//! subcategories, which have no life of their own outside the parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, SubcategoryId};

/// Label used when a transaction's category cannot be resolved
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Label used when a budget's category cannot be resolved
pub const UNKNOWN_CATEGORY: &str = "Unknown";

const MAX_NAME_LEN: usize = 50;

/// A child of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Subcategory {
    pub fn from_new(new: NewSubcategory) -> Self {
        Self {
            id: SubcategoryId::new(),
            name: new.name,
            description: new.description,
        }
    }
}

/// A spending/income category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Subcategories in insertion order
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Materialize a new category with a fresh id and no subcategories
    pub fn from_new(new: NewCategory) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: new.name,
            description: new.description,
            subcategories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a subcategory and return the stored copy
    pub fn push_subcategory(&mut self, new: NewSubcategory) -> Subcategory {
        let sub = Subcategory::from_new(new);
        self.subcategories.push(sub.clone());
        self.updated_at = Utc::now();
        sub
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Input for creating a category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

/// Input for adding a subcategory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSubcategory {
    pub name: String,
    pub description: String,
}

impl NewSubcategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

/// Partial update for a category. Subcategories are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = description.clone();
        }
        category.updated_at = Utc::now();
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }
    Ok(())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
