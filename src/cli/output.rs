use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::core::services::{AlertAction, OverspendAlert};
use crate::domain::{BudgetMode, Category, MonthKey, NamedEntity};

/// One overspent category with its latest balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub category: Category,
    pub balance: Option<i64>,
}

/// Everything the report command prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub month: MonthKey,
    pub mode: BudgetMode,
    pub alert: Option<OverspendAlert>,
    pub lines: Vec<ReportLine>,
}

/// Renders amounts and reports for the terminal.
pub struct Formatter {
    currency: String,
    color: bool,
}

impl Formatter {
    pub fn new(currency: impl Into<String>, color: bool) -> Self {
        Self {
            currency: currency.into(),
            color,
        }
    }

    /// Formats minor units, e.g. `-5000` as `-$50.00` or `-¥5000`.
    pub fn amount(&self, minor_units: i64) -> String {
        let sign = if minor_units < 0 { "-" } else { "" };
        let magnitude = minor_units.unsigned_abs();
        let number = match minor_digits(&self.currency) {
            0 => magnitude.to_string(),
            _ => format!("{}.{:02}", magnitude / 100, magnitude % 100),
        };
        match currency_symbol(&self.currency) {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{number} {}", self.currency),
        }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        let title = format!(
            "Overspending for {} ({} budget)",
            report.month, report.mode
        );
        let _ = writeln!(out, "{}", self.paint(&title, |text| text.bold()));

        let Some(alert) = &report.alert else {
            let _ = writeln!(
                out,
                "{}",
                self.paint("No overspent categories", |text| text.green())
            );
            return out;
        };

        let label = alert.action.label();
        let action = match alert.action {
            AlertAction::Cover => self.paint(label, |text| text.yellow()),
            AlertAction::Info => self.paint(label, |text| text.cyan()),
        };
        let _ = writeln!(
            out,
            "{} [{}] total {}",
            self.paint(&alert.message(), |text| text.red()),
            action,
            self.amount(-alert.total_overspent)
        );

        let width = report
            .lines
            .iter()
            .map(|line| line.category.name().chars().count())
            .max()
            .unwrap_or(0);
        for line in &report.lines {
            let balance = line
                .balance
                .map(|value| self.amount(value))
                .unwrap_or_else(|| "?".to_string());
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                line.category.name(),
                self.paint(&balance, |text| text.red()),
                width = width
            );
        }
        out
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Decimal places of the currency's minor unit.
fn minor_digits(code: &str) -> u32 {
    match code.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryId;

    fn plain() -> Formatter {
        Formatter::new("USD", false)
    }

    #[test]
    fn amounts_use_currency_symbol_or_code() {
        assert_eq!(plain().amount(-5000), "-$50.00");
        assert_eq!(plain().amount(7), "$0.07");
        assert_eq!(Formatter::new("CHF", false).amount(12345), "123.45 CHF");
    }

    #[test]
    fn zero_decimal_currencies_have_no_fraction() {
        assert_eq!(Formatter::new("JPY", false).amount(-5000), "-¥5000");
        assert_eq!(Formatter::new("KRW", false).amount(1200), "1200 KRW");
    }

    #[test]
    fn uncolored_render_ignores_global_override() {
        let report = Report {
            month: MonthKey::parse("2024-03").unwrap(),
            mode: BudgetMode::Envelope,
            alert: None,
            lines: Vec::new(),
        };
        colored::control::set_override(true);
        let text = plain().render(&report);
        colored::control::unset_override();
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn empty_report_says_so() {
        let report = Report {
            month: MonthKey::parse("2024-03").unwrap(),
            mode: BudgetMode::Envelope,
            alert: None,
            lines: Vec::new(),
        };
        let text = plain().render(&report);
        assert!(text.contains("Overspending for 2024-03 (Envelope budget)"));
        assert!(text.contains("No overspent categories"));
    }

    #[test]
    fn lines_are_aligned() {
        let report = Report {
            month: MonthKey::parse("2024-03").unwrap(),
            mode: BudgetMode::Tracking,
            alert: Some(OverspendAlert {
                count: 2,
                total_overspent: 6000,
                action: AlertAction::Info,
            }),
            lines: vec![
                ReportLine {
                    category: Category::with_id(CategoryId::from("cat1"), "Food"),
                    balance: Some(-1000),
                },
                ReportLine {
                    category: Category::with_id(CategoryId::from("cat2"), "Transport"),
                    balance: Some(-5000),
                },
            ],
        };
        let text = plain().render(&report);
        assert!(text.contains("You have 2 overspent categories [Info] total -$60.00"));
        assert!(text.contains("  Food       -$10.00"));
        assert!(text.contains("  Transport  -$50.00"));
    }
}
