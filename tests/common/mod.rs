#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use overspend_core::{
    cells::{Binding, MemorySheet},
    config::ConfigManager,
    domain::{Category, CategoryId, MonthKey},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a config manager backed by a unique directory.
pub fn setup_config() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}

pub fn march() -> MonthKey {
    MonthKey::parse("2024-03").expect("valid month")
}

pub fn april() -> MonthKey {
    MonthKey::parse("2024-04").expect("valid month")
}

/// Writes both signals for a category in `month`.
pub fn seed(sheet: &MemorySheet, id: &str, month: MonthKey, balance: i64, carryover: bool) {
    let id = CategoryId::from(id);
    sheet.set_amount(&Binding::balance(id.clone(), month), balance);
    sheet.set_flag(&Binding::carryover(id, month), carryover);
}

/// The five-category mix of visible/hidden expense and income categories.
pub fn mixed_categories() -> Vec<Category> {
    vec![
        Category::with_id("cat1", "Visible Expense").in_group("group1"),
        Category::with_id("cat2", "Hidden Expense")
            .hidden(true)
            .in_group("group1"),
        Category::with_id("cat3", "Visible Income")
            .income(true)
            .in_group("group2"),
        Category::with_id("cat4", "Hidden Income")
            .hidden(true)
            .income(true)
            .in_group("group2"),
        Category::with_id("cat5", "Another Visible Expense").in_group("group1"),
    ]
}

pub fn ids(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|c| c.id.to_string()).collect()
}
