//! Value Objects - Immutable, identity-less domain primitives

mod compass_point;
mod icon_category;
mod station_credentials;
mod timezone;
mod widget_id;

pub use compass_point::CompassPoint;
pub use icon_category::IconCategory;
pub use station_credentials::StationCredentials;
pub use timezone::Timezone;
pub use widget_id::WidgetId;
