pub mod classifier;
pub mod errors;
pub mod services;
pub mod utils;
pub mod watcher;

pub use classifier::{classify, eligible_categories, is_eligible, is_overspent, SignalTable};
pub use watcher::OverspendWatcher;
