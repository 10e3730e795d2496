//! Read-only collaborator contracts consumed by the overspending watcher.

pub mod categories;
pub mod prefs;

use crate::domain::{BudgetMode, Category, CategoryId, BUDGET_TYPE_PREF};

pub use categories::CategoryStore;
pub use prefs::SyncedPrefs;

/// Repository exposing the current category list.
pub trait CategorySource {
    fn list(&self) -> Vec<Category>;

    fn get(&self, id: &CategoryId) -> Option<Category> {
        self.list().into_iter().find(|category| &category.id == id)
    }
}

/// Store of synced user preferences.
pub trait PreferenceSource {
    fn synced_pref(&self, key: &str) -> Option<String>;

    /// Active budget mode; unset or unknown values resolve to envelope.
    fn budget_mode(&self) -> BudgetMode {
        BudgetMode::from_pref(self.synced_pref(BUDGET_TYPE_PREF).as_deref())
    }
}

impl<T: CategorySource + ?Sized> CategorySource for &T {
    fn list(&self) -> Vec<Category> {
        (**self).list()
    }

    fn get(&self, id: &CategoryId) -> Option<Category> {
        (**self).get(id)
    }
}

impl<T: PreferenceSource + ?Sized> PreferenceSource for &T {
    fn synced_pref(&self, key: &str) -> Option<String> {
        (**self).synced_pref(key)
    }
}
