pub mod budget_mode;
pub mod category;
pub mod common;
pub mod month;

pub use budget_mode::{BudgetMode, BUDGET_TYPE_PREF};
pub use category::{Category, CategoryGroup, CategoryId};
pub use common::{Displayable, NamedEntity};
pub use month::MonthKey;
