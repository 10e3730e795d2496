use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::errors::OverspendError;

/// Synced preference key holding the active budget mode.
pub const BUDGET_TYPE_PREF: &str = "budgetType";

/// Budgeting style selected by the user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetMode {
    /// Every dollar is assigned; overspending anywhere must be covered.
    #[default]
    Envelope,
    /// Budget amounts are targets; only visible expense categories are reported.
    Tracking,
}

impl BudgetMode {
    /// Resolves the mode from a raw preference value, falling back to envelope.
    pub fn from_pref(raw: Option<&str>) -> Self {
        match raw {
            None => BudgetMode::Envelope,
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(value, "unrecognized budget type, using envelope");
                BudgetMode::Envelope
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BudgetMode::Envelope => "envelope",
            BudgetMode::Tracking => "tracking",
        }
    }
}

impl FromStr for BudgetMode {
    type Err = OverspendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "envelope" | "rollover" => Ok(BudgetMode::Envelope),
            "tracking" | "report" => Ok(BudgetMode::Tracking),
            other => Err(OverspendError::InvalidInput(format!(
                "unknown budget type `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for BudgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetMode::Envelope => "Envelope",
            BudgetMode::Tracking => "Tracking",
        };
        f.write_str(label)
    }
}
