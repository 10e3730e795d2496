//! Contract with the reactive cell-binding engine.
//!
//! A [`CellBinder`] hands out per-cell subscriptions: the callback receives the
//! current value right away and again on every change until the returned
//! [`Subscription`] is dropped or explicitly released.

pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, MonthKey};

pub use memory::MemorySheet;

/// Named per-category signals published by the budget sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalName {
    Balance,
    Carryover,
}

impl SignalName {
    pub const ALL: [SignalName; 2] = [SignalName::Balance, SignalName::Carryover];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalName::Balance => "balance",
            SignalName::Carryover => "carryover",
        }
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value delivered by a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Signed amount in minor currency units.
    Amount(i64),
    Flag(bool),
    Empty,
}

impl CellValue {
    pub fn as_amount(&self) -> Option<i64> {
        match self {
            CellValue::Amount(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CellValue::Flag(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Amount(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Flag(value)
    }
}

/// Address of one signal for one category in one month.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub signal: SignalName,
    pub category_id: CategoryId,
    pub month: MonthKey,
}

impl Binding {
    pub fn new(signal: SignalName, category_id: CategoryId, month: MonthKey) -> Self {
        Self {
            signal,
            category_id,
            month,
        }
    }

    pub fn balance(category_id: CategoryId, month: MonthKey) -> Self {
        Self::new(SignalName::Balance, category_id, month)
    }

    pub fn carryover(category_id: CategoryId, month: MonthKey) -> Self {
        Self::new(SignalName::Carryover, category_id, month)
    }

    pub fn sheet_name(&self) -> String {
        self.month.sheet_name()
    }

    pub fn cell_name(&self) -> String {
        format!("{}-{}", self.signal, self.category_id)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.sheet_name(), self.cell_name())
    }
}

pub type CellCallback = Box<dyn FnMut(CellValue)>;

/// Reactive source of cell values.
pub trait CellBinder {
    fn bind(&self, binding: &Binding, callback: CellCallback) -> Subscription;
}

impl<T: CellBinder + ?Sized> CellBinder for &T {
    fn bind(&self, binding: &Binding, callback: CellCallback) -> Subscription {
        (**self).bind(binding, callback)
    }
}

/// Guard for a live binding; releases it exactly once when dropped.
#[must_use = "dropping a subscription unbinds it immediately"]
pub struct Subscription {
    unbind: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unbind: impl FnOnce() + 'static) -> Self {
        Self {
            unbind: Some(Box::new(unbind)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unbind) = self.unbind.take() {
            unbind();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unbind.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn subscription_releases_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));
        subscription.unsubscribe();
        assert_eq!(calls.get(), 1);

        let counter = Rc::clone(&calls);
        {
            let _guard = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn binding_names_follow_sheet_layout() {
        let month = MonthKey::parse("2024-03").unwrap();
        let binding = Binding::carryover(CategoryId::from("cat1"), month);
        assert_eq!(binding.to_string(), "budget202403!carryover-cat1");
    }

    #[test]
    fn cell_value_accessors_are_typed() {
        assert_eq!(CellValue::Amount(-5).as_amount(), Some(-5));
        assert_eq!(CellValue::Amount(-5).as_flag(), None);
        assert_eq!(CellValue::Flag(true).as_flag(), Some(true));
        assert_eq!(CellValue::Empty.as_amount(), None);
    }
}
