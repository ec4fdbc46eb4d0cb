//! Category service
//!
//! Validation, duplicate-name checks and lookups on top of the category
//! repository. Deleting a category never cascades: transactions and budgets
//! keep the dangling id and fall back to a display label.

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    Category, CategoryId, CategoryPatch, NewCategory, NewSubcategory, Subcategory, UNCATEGORIZED,
    UNKNOWN_CATEGORY,
};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a new category
    pub fn create(&self, new: NewCategory) -> ExpenseResult<Category> {
        let new = NewCategory {
            name: new.name.trim().to_string(),
            description: new.description.trim().to_string(),
        };
        new.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        self.ensure_unique_name(&new.name, None)?;

        let category = self.storage.categories.insert(new)?;
        info!(category = %category.id, name = %category.name, "Created category");
        Ok(category)
    }

    /// Update a category; `Ok(None)` when the id is unknown outside strict mode
    pub fn update(&self, id: CategoryId, patch: CategoryPatch) -> ExpenseResult<Option<Category>> {
        let patch = CategoryPatch {
            name: patch.name.map(|n| n.trim().to_string()),
            description: patch.description.map(|d| d.trim().to_string()),
        };
        if let Some(name) = &patch.name {
            NewCategory::new(name.clone())
                .validate()
                .map_err(|e| ExpenseError::Validation(e.to_string()))?;
            self.ensure_unique_name(name, Some(id))?;
        }

        match self.storage.categories.update(id, &patch)? {
            Some(category) => {
                info!(category = %category.id, "Updated category");
                Ok(Some(category))
            }
            None => self.missing(id).map(|_| None),
        }
    }

    /// Delete a category. Returns whether anything was removed.
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<bool> {
        if self.storage.categories.remove(id)? {
            info!(category = %id, "Deleted category");
            Ok(true)
        } else {
            self.missing(id).map(|_| false)
        }
    }

    /// Append a subcategory to the given category
    pub fn add_subcategory(
        &self,
        category_id: CategoryId,
        new: NewSubcategory,
    ) -> ExpenseResult<Option<Subcategory>> {
        let new = NewSubcategory {
            name: new.name.trim().to_string(),
            description: new.description.trim().to_string(),
        };
        new.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        match self.storage.categories.add_subcategory(category_id, new)? {
            Some(sub) => {
                info!(category = %category_id, subcategory = %sub.id, "Added subcategory");
                Ok(Some(sub))
            }
            None => self.missing(category_id).map(|_| None),
        }
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or id string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }
        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// Like [`CategoryService::find`] but unknown identifiers are an error
    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Display label for a transaction's category
    pub fn transaction_label(&self, id: Option<CategoryId>) -> ExpenseResult<String> {
        Ok(self.name_of(id)?.unwrap_or_else(|| UNCATEGORIZED.to_string()))
    }

    /// Display label for a budget's category
    pub fn budget_label(&self, id: CategoryId) -> ExpenseResult<String> {
        Ok(self
            .name_of(Some(id))?
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()))
    }

    fn name_of(&self, id: Option<CategoryId>) -> ExpenseResult<Option<String>> {
        match id {
            Some(id) => Ok(self.storage.categories.get(id)?.map(|c| c.name)),
            None => Ok(None),
        }
    }

    fn ensure_unique_name(&self, name: &str, except: Option<CategoryId>) -> ExpenseResult<()> {
        if let Some(existing) = self.storage.categories.get_by_name(name)? {
            if Some(existing.id) != except {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn missing(&self, id: CategoryId) -> ExpenseResult<()> {
        if self.settings.strict_mode {
            return Err(ExpenseError::category_not_found(id.to_string()));
        }
        debug!(category = %id, "Ignoring unknown category id");
        Ok(())
    }
}
