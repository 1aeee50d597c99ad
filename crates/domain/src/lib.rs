//! Domain layer for the PWS widget refresher
//!
//! Contains the observation model, the persisted display model and the
//! value objects shared by the acquisition pipeline.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
