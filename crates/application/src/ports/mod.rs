//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod observation_port;
mod preference_store;
mod renderer_port;

#[cfg(test)]
pub use observation_port::MockObservationPort;
pub use observation_port::ObservationPort;
#[cfg(test)]
pub use preference_store::MockPreferenceStorePort;
pub use preference_store::{
    KeyTransform, LookupChain, LookupStep, PreferenceStorePort, SHARED_NAMESPACE, SHARED_PREFIX,
    WIDGET_NAMESPACE,
};
#[cfg(test)]
pub use renderer_port::MockWidgetRendererPort;
pub use renderer_port::{RenderTarget, WidgetRendererPort, WidgetView};
