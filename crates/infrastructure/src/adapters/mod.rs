//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod memory_preference_store;
mod pws_observation_adapter;

pub use memory_preference_store::InMemoryPreferenceStore;
pub use pws_observation_adapter::PwsObservationAdapter;
