//! JSON budget snapshots consumed by the report command.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::cells::{Binding, MemorySheet};
use crate::core::errors::{OverspendError, Result};
use crate::domain::{CategoryGroup, CategoryId, MonthKey, BUDGET_TYPE_PREF};
use crate::sources::{CategoryStore, PreferenceSource};

/// One category's cells for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellEntry {
    pub month: MonthKey,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carryover: Option<bool>,
}

/// Category groups plus computed cell values, as exported from a budget file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<String>,
    #[serde(default)]
    pub groups: Vec<CategoryGroup>,
    #[serde(default)]
    pub cells: Vec<CellEntry>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OverspendError::StorageError(format!(
                "snapshot `{}` not found",
                path.display()
            )));
        }
        let data = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        tracing::debug!(
            path = %path.display(),
            groups = snapshot.groups.len(),
            cells = snapshot.cells.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn categories(&self) -> CategoryStore {
        CategoryStore::from_groups(&self.groups)
    }

    /// Builds a sheet holding every cell value in the snapshot.
    pub fn sheet(&self) -> MemorySheet {
        let sheet = MemorySheet::new();
        for entry in &self.cells {
            if let Some(balance) = entry.balance {
                sheet.set_amount(
                    &Binding::balance(entry.category_id.clone(), entry.month),
                    balance,
                );
            }
            if let Some(carryover) = entry.carryover {
                sheet.set_flag(
                    &Binding::carryover(entry.category_id.clone(), entry.month),
                    carryover,
                );
            }
        }
        sheet
    }

    /// Most recent month that has any cell data.
    pub fn latest_month(&self) -> Option<MonthKey> {
        self.cells.iter().map(|entry| entry.month).max()
    }
}

impl PreferenceSource for Snapshot {
    fn synced_pref(&self, key: &str) -> Option<String> {
        if key == BUDGET_TYPE_PREF {
            self.budget_type.clone()
        } else {
            None
        }
    }
}
