//! Builds the overspending banner shown above the budget.

use serde::Serialize;

use crate::core::classifier::SignalTable;
use crate::domain::{BudgetMode, Category};

/// What the banner offers to do about overspending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    /// Envelope budgets move money from another category to cover the gap.
    Cover,
    /// Tracking budgets only list the categories.
    Info,
}

impl AlertAction {
    pub fn for_mode(mode: BudgetMode) -> Self {
        match mode {
            BudgetMode::Envelope => AlertAction::Cover,
            BudgetMode::Tracking => AlertAction::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertAction::Cover => "Cover",
            AlertAction::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverspendAlert {
    pub count: usize,
    /// Sum of the negative balances, as a positive amount in minor units.
    pub total_overspent: i64,
    pub action: AlertAction,
}

impl OverspendAlert {
    pub fn message(&self) -> String {
        if self.count == 1 {
            "You have 1 overspent category".to_string()
        } else {
            format!("You have {} overspent categories", self.count)
        }
    }
}

pub struct AlertService;

impl AlertService {
    /// Summarizes an overspent result; `None` when nothing is overspent.
    pub fn summarize(
        overspent: &[Category],
        mode: BudgetMode,
        signals: &SignalTable,
    ) -> Option<OverspendAlert> {
        if overspent.is_empty() {
            return None;
        }
        let total_overspent = overspent
            .iter()
            .filter_map(|category| signals.balance(&category.id))
            .map(|balance| balance.saturating_neg().max(0))
            .fold(0i64, i64::saturating_add);
        Some(OverspendAlert {
            count: overspent.len(),
            total_overspent,
            action: AlertAction::for_mode(mode),
        })
    }
}
