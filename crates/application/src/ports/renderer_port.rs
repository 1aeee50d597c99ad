//! Widget renderer port
//!
//! The rendering surface is external: the refresher hands it a fully
//! formatted [`WidgetView`] and does not care how it is painted.

use std::fmt;

use async_trait::async_trait;
use domain::{IconCategory, WidgetId};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Display lines a renderer paints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetView {
    /// e.g. `21.3°`
    pub temperature: String,
    /// e.g. `65%`
    pub humidity: String,
    /// e.g. `1.20 mm`
    pub precipitation: String,
    /// e.g. `12.0 km/h SW`
    pub wind: String,
    /// e.g. `1013.2 hPa`
    pub pressure: String,
    /// e.g. `0.00 mm/hr`
    pub precip_rate: String,
    /// Dew point, e.g. `14.1°`
    pub dew_point: String,
    /// Raw condition phrase
    pub condition: String,
    /// Station display name
    pub station: String,
    /// `Act. DD/MM HH:mm`
    pub updated_label: String,
    /// `Act. HH:mm`, for small layouts
    pub updated_label_compact: String,
    /// Icon to show
    pub icon: IconCategory,
    /// Whether the view was computed as daytime
    pub is_daylight: bool,
}

/// Which widgets to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderTarget {
    /// Every placed widget
    All,
    /// The widget that requested the refresh
    Widget(WidgetId),
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Widget(id) => write!(f, "widget {id}"),
        }
    }
}

/// Port for the rendering surface
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WidgetRendererPort: Send + Sync {
    /// Redraw `target` with `view`
    async fn render(&self, target: RenderTarget, view: &WidgetView) -> Result<(), ApplicationError>;
}
