#![doc(test(attr(deny(warnings))))]

//! Overspend Core classifies which budget categories are overspent for a
//! month and keeps the answer live as balances, carryover flags, categories
//! and the budget mode change.
//!
//! ```
//! use overspend_core::{
//!     cells::{Binding, MemorySheet},
//!     core::OverspendWatcher,
//!     domain::{Category, CategoryId, MonthKey},
//! };
//!
//! let month = MonthKey::parse("2024-03").unwrap();
//! let sheet = MemorySheet::new();
//! sheet.set_amount(&Binding::balance(CategoryId::from("cat1"), month), -5000);
//! sheet.set_flag(&Binding::carryover(CategoryId::from("cat1"), month), false);
//!
//! let mut watcher = OverspendWatcher::new(sheet.clone(), month);
//! watcher.set_categories(vec![Category::with_id("cat1", "Groceries")]);
//! assert_eq!(watcher.overspent()[0].name, "Groceries");
//! ```

pub mod cells;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod sources;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Overspend Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
