//! Application services - Use case implementations

pub mod display_formatter;
pub mod precipitation_reconciler;
mod refresh_service;
pub mod weather_classifier;

pub use display_formatter::{StoredReadings, render_view};
pub use precipitation_reconciler::reconcile;
pub use refresh_service::{CycleReport, RefreshOutcome, RefreshService, RefreshTrigger};
pub use weather_classifier::{ClassifierInput, RuleOutcome, TextRule, classify};
