//! Category repository
//!
//! Owns the category tree. Subcategories are only reachable through their
//! parent, so adding one touches exactly one category.

use std::sync::RwLock;

use crate::error::ExpenseResult;
use crate::models::{Category, CategoryId, CategoryPatch, NewCategory, NewSubcategory, Subcategory};

use super::{read, write};

/// Repository for categories and their subcategories
#[derive(Default)]
pub struct CategoryRepository {
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, new: NewCategory) -> ExpenseResult<Category> {
        let category = Category::from_new(new);
        write(&self.data)?.push(category.clone());
        Ok(category)
    }

    /// Remove by id. Budgets and transactions referencing it are left alone.
    pub fn remove(&self, id: CategoryId) -> ExpenseResult<bool> {
        let mut data = write(&self.data)?;
        let before = data.len();
        data.retain(|c| c.id != id);
        Ok(data.len() != before)
    }

    pub fn update(&self, id: CategoryId, patch: &CategoryPatch) -> ExpenseResult<Option<Category>> {
        let mut data = write(&self.data)?;
        Ok(data.iter_mut().find(|c| c.id == id).map(|category| {
            patch.apply_to(category);
            category.clone()
        }))
    }

    /// Append a subcategory to `category_id`. `None` when the category is absent.
    pub fn add_subcategory(
        &self,
        category_id: CategoryId,
        new: NewSubcategory,
    ) -> ExpenseResult<Option<Subcategory>> {
        let mut data = write(&self.data)?;
        Ok(data
            .iter_mut()
            .find(|c| c.id == category_id)
            .map(|category| category.push_subcategory(new)))
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        Ok(read(&self.data)?.iter().find(|c| c.id == id).cloned())
    }

    /// First category whose name matches, ignoring case
    pub fn get_by_name(&self, name: &str) -> ExpenseResult<Option<Category>> {
        let name_lower = name.trim().to_lowercase();
        Ok(read(&self.data)?
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn get_all(&self) -> ExpenseResult<Vec<Category>> {
        Ok(read(&self.data)?.clone())
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_operations() {
        let repo = CategoryRepository::new();
        let food = repo.insert(NewCategory::new("Food")).unwrap();
        let rent = repo.insert(NewCategory::new("Rent")).unwrap();
        assert_ne!(food.id, rent.id);
        assert_eq!(repo.count().unwrap(), 2);

        let updated = repo
            .update(
                food.id,
                &CategoryPatch {
                    description: Some("Meals and groceries".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Food");
        assert_eq!(updated.description, "Meals and groceries");

        assert!(repo.remove(food.id).unwrap());
        assert!(!repo.remove(food.id).unwrap());
        assert_eq!(repo.get_all().unwrap()[0].id, rent.id);
    }

    #[test]
    fn test_add_subcategory_scoped_to_parent() {
        let repo = CategoryRepository::new();
        let a = repo.insert(NewCategory::new("A")).unwrap();
        let b = repo.insert(NewCategory::new("B")).unwrap();

        let sub = repo
            .add_subcategory(a.id, NewSubcategory::new("A1"))
            .unwrap()
            .unwrap();
        repo.add_subcategory(a.id, NewSubcategory::new("A2")).unwrap();

        let a = repo.get(a.id).unwrap().unwrap();
        let b = repo.get(b.id).unwrap().unwrap();
        assert_eq!(a.subcategories.len(), 2);
        assert_eq!(a.subcategories[0].id, sub.id);
        assert!(b.subcategories.is_empty());
    }

    #[test]
    fn test_add_subcategory_to_missing_category_is_noop() {
        let repo = CategoryRepository::new();
        let a = repo.insert(NewCategory::new("A")).unwrap();
        let before = repo.get_all().unwrap();

        let result = repo
            .add_subcategory(CategoryId::new(), NewSubcategory::new("Ghost"))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(repo.get_all().unwrap(), before);
        assert!(repo.get(a.id).unwrap().unwrap().subcategories.is_empty());
    }

    #[test]
    fn test_get_by_name_is_case_insensitive() {
        let repo = CategoryRepository::new();
        repo.insert(NewCategory::new("Dining Out")).unwrap();
        assert!(repo.get_by_name("dining out").unwrap().is_some());
        assert!(repo.get_by_name("  DINING OUT ").unwrap().is_some());
        assert!(repo.get_by_name("dining").unwrap().is_none());
    }
}
