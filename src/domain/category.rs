//! Domain types representing budget categories and their groups.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Stable identifier of a category for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Mints a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A budget category as owned by the category repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub is_income: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Category {
    /// Creates a visible expense category with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(CategoryId::generate(), name)
    }

    pub fn with_id(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hidden: false,
            is_income: false,
            group: None,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn income(mut self, is_income: bool) -> Self {
        self.is_income = is_income;
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        let kind = if self.is_income { "Income" } else { "Expense" };
        if self.hidden {
            format!("{} ({}, hidden)", self.name, kind)
        } else {
            format!("{} ({})", self.name, kind)
        }
    }
}

/// Named collection of categories sharing an income/expense side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_income: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_income: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_income,
            hidden: false,
            categories: Vec::new(),
        }
    }

    /// Adds a category, stamping it with this group's id.
    pub fn push(&mut self, category: Category) {
        let category = category.in_group(self.id.clone());
        self.categories.push(category);
    }
}

impl NamedEntity for CategoryGroup {
    fn name(&self) -> &str {
        &self.name
    }
}
