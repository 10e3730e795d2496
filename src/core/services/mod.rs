pub mod alert_service;

pub use alert_service::{AlertAction, AlertService, OverspendAlert};
