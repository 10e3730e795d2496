use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PreferenceSource;
use crate::domain::{BudgetMode, BUDGET_TYPE_PREF};

/// Key/value preferences synced across devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SyncedPrefs {
    values: BTreeMap<String, String>,
}

impl SyncedPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn set_budget_mode(&mut self, mode: BudgetMode) {
        self.set(BUDGET_TYPE_PREF, mode.as_str());
    }
}

impl PreferenceSource for SyncedPrefs {
    fn synced_pref(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
