//! Console stand-in for the widget surface

use std::fmt::Write as _;
use std::io::Write;

use application::{
    error::ApplicationError,
    ports::{RenderTarget, WidgetRendererPort, WidgetView},
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Render a view as the text block the widget would show
#[must_use]
pub fn format_view(view: &WidgetView, compact: bool) -> String {
    let label = if compact {
        &view.updated_label_compact
    } else {
        &view.updated_label
    };
    let headline = if view.condition.trim().is_empty() {
        view.icon.as_str()
    } else {
        view.condition.as_str()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {}  {headline}", view.icon.emoji(), view.temperature);
    let _ = writeln!(out, "{}", view.station);
    let _ = writeln!(out, "Humidity   {}", view.humidity);
    let _ = writeln!(out, "Wind       {}", view.wind);
    let _ = writeln!(out, "Pressure   {}", view.pressure);
    let _ = writeln!(out, "Rain       {} ({})", view.precipitation, view.precip_rate);
    let _ = writeln!(out, "Dew point  {}", view.dew_point);
    out.push_str(label);
    out
}

/// Writes each rendered view to a stream
pub struct ConsoleRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    compact: bool,
}

impl std::fmt::Debug for ConsoleRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleRenderer")
            .field("compact", &self.compact)
            .finish_non_exhaustive()
    }
}

impl ConsoleRenderer {
    /// Render into `out`
    #[must_use]
    pub fn new(out: impl Write + Send + 'static, compact: bool) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            compact,
        }
    }

    /// Render to standard output
    #[must_use]
    pub fn stdout(compact: bool) -> Self {
        Self::new(std::io::stdout(), compact)
    }
}

#[async_trait]
impl WidgetRendererPort for ConsoleRenderer {
    async fn render(&self, target: RenderTarget, view: &WidgetView) -> Result<(), ApplicationError> {
        let text = format_view(view, self.compact);
        let mut out = self.out.lock();
        if let RenderTarget::Widget(id) = target {
            writeln!(out, "[widget {id}]")
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        }
        writeln!(out, "{text}")
            .and_then(|()| out.flush())
            .map_err(|e| ApplicationError::Internal(e.to_string()))
    }
}
