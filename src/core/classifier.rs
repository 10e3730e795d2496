//! Overspending classification over categories and their latest cell values.
//!
//! Everything here is a pure function of its inputs; the watcher calls
//! [`classify`] after every delivery instead of patching results incrementally.

use std::collections::{HashMap, HashSet};

use crate::cells::{CellValue, SignalName};
use crate::domain::{BudgetMode, Category, CategoryId};

/// Latest observed value per category and signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalTable {
    values: HashMap<(CategoryId, SignalName), CellValue>,
}

impl SignalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a delivery, returning whether the stored value changed.
    pub fn record(&mut self, id: &CategoryId, signal: SignalName, value: CellValue) -> bool {
        let key = (id.clone(), signal);
        if self.values.get(&key) == Some(&value) {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    /// Latest balance, or `None` until a numeric value has been delivered.
    pub fn balance(&self, id: &CategoryId) -> Option<i64> {
        self.values
            .get(&(id.clone(), SignalName::Balance))
            .and_then(CellValue::as_amount)
    }

    /// Latest carryover flag, or `None` until a boolean has been delivered.
    pub fn carryover(&self, id: &CategoryId) -> Option<bool> {
        self.values
            .get(&(id.clone(), SignalName::Carryover))
            .and_then(CellValue::as_flag)
    }

    pub fn forget(&mut self, id: &CategoryId) {
        for signal in SignalName::ALL {
            self.values.remove(&(id.clone(), signal));
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of recorded `(category, signal)` values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Whether a category may appear in the result under `mode`.
pub fn is_eligible(category: &Category, mode: BudgetMode) -> bool {
    match mode {
        BudgetMode::Envelope => true,
        BudgetMode::Tracking => !category.hidden && !category.is_income,
    }
}

/// Negative balance that is not intentionally carried over.
///
/// Unknown signals never count as overspent.
pub fn is_overspent(balance: Option<i64>, carryover: Option<bool>) -> bool {
    matches!((balance, carryover), (Some(amount), Some(false)) if amount < 0)
}

/// Mode-filtered categories, de-duplicated by id with the first occurrence kept.
pub fn eligible_categories(categories: &[Category], mode: BudgetMode) -> Vec<Category> {
    let mut seen = HashSet::new();
    categories
        .iter()
        .filter(|category| is_eligible(category, mode))
        .filter(|category| seen.insert(category.id.clone()))
        .cloned()
        .collect()
}

/// Overspent categories in source order.
pub fn classify(categories: &[Category], mode: BudgetMode, signals: &SignalTable) -> Vec<Category> {
    eligible_categories(categories, mode)
        .into_iter()
        .filter(|category| {
            is_overspent(signals.balance(&category.id), signals.carryover(&category.id))
        })
        .collect()
}
