use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::CategorySource;
use crate::core::errors::{OverspendError, Result};
use crate::domain::{Category, CategoryGroup, CategoryId};

/// Vec-backed category repository preserving insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Flattens groups in group order, then category order.
    pub fn from_groups(groups: &[CategoryGroup]) -> Self {
        let categories = groups
            .iter()
            .flat_map(|group| {
                group.categories.iter().map(move |category| {
                    let mut category = category.clone();
                    if category.group.is_none() {
                        category.group = Some(group.id.clone());
                    }
                    category
                })
            })
            .collect();
        Self { categories }
    }

    pub fn add(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn remove(&mut self, id: &CategoryId) -> Result<Category> {
        let index = self.position(id)?;
        Ok(self.categories.remove(index))
    }

    pub fn set_hidden(&mut self, id: &CategoryId, hidden: bool) -> Result<()> {
        let index = self.position(id)?;
        self.categories[index].hidden = hidden;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Ids appearing more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<CategoryId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for category in &self.categories {
            if !seen.insert(&category.id) && !duplicates.contains(&category.id) {
                duplicates.push(category.id.clone());
            }
        }
        duplicates
    }

    fn position(&self, id: &CategoryId) -> Result<usize> {
        self.categories
            .iter()
            .position(|category| &category.id == id)
            .ok_or_else(|| OverspendError::CategoryNotFound(id.to_string()))
    }
}

impl CategorySource for CategoryStore {
    fn list(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn get(&self, id: &CategoryId) -> Option<Category> {
        self.categories.iter().find(|category| &category.id == id).cloned()
    }
}
