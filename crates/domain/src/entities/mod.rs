//! Domain entities

mod display_model;
mod observation;

pub use display_model::{DisplayModel, UNKNOWN_VALUE, keys};
pub use observation::{HourlyPrecipSummary, Observation};
