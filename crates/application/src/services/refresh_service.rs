//! Refresh pipeline
//!
//! One cycle: read credentials, fetch the current observation and the
//! same-day hourly history concurrently, reconcile precipitation, classify,
//! format, persist every display key in one write and notify the renderer.
//!
//! The pipeline never retries on its own. It reports [`RefreshOutcome::Retry`]
//! and leaves rescheduling to the caller.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{HourlyPrecipSummary, StationCredentials, Timezone, WidgetId, keys};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    LookupChain, ObservationPort, PreferenceStorePort, RenderTarget, WidgetRendererPort, WidgetView,
};
use crate::services::display_formatter::{self, StoredReadings};
use crate::services::precipitation_reconciler::reconcile;
use crate::services::weather_classifier::{ClassifierInput, classify};

/// What started a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Periodic tick
    Scheduled,
    /// Explicit user request, optionally from one widget
    Forced(Option<WidgetId>),
}

impl RefreshTrigger {
    /// Build a trigger from request flags
    #[must_use]
    pub const fn from_request(forced: bool, target: Option<WidgetId>) -> Self {
        if forced || target.is_some() {
            Self::Forced(target)
        } else {
            Self::Scheduled
        }
    }

    /// Widgets to redraw after the cycle
    #[must_use]
    pub const fn render_target(self) -> RenderTarget {
        match self {
            Self::Forced(Some(id)) => RenderTarget::Widget(id),
            Self::Forced(None) | Self::Scheduled => RenderTarget::All,
        }
    }

    /// Whether the trigger came from a user
    #[must_use]
    pub const fn is_forced(self) -> bool {
        matches!(self, Self::Forced(_))
    }
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => f.write_str("scheduled"),
            Self::Forced(None) => f.write_str("forced"),
            Self::Forced(Some(id)) => write!(f, "forced({id})"),
        }
    }
}

/// Signal handed back to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Done, including the "not configured" no-op
    Success,
    /// Nothing was written; try again later
    Retry,
}

impl RefreshOutcome {
    /// Whether the cycle completed
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of a completed cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    /// New data was persisted
    Updated(WidgetView),
    /// Credentials are missing; nothing was fetched or written
    NotConfigured,
}

/// Service running refresh cycles
pub struct RefreshService {
    observations: Arc<dyn ObservationPort>,
    store: Arc<dyn PreferenceStorePort>,
    renderer: Option<Arc<dyn WidgetRendererPort>>,
    lookup: LookupChain,
    timezone: Timezone,
}

impl fmt::Debug for RefreshService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshService")
            .field("lookup", &self.lookup)
            .field("timezone", &self.timezone)
            .field("has_renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl RefreshService {
    /// Create a new refresh service
    #[must_use]
    pub fn new(
        observations: Arc<dyn ObservationPort>,
        store: Arc<dyn PreferenceStorePort>,
        lookup: LookupChain,
        timezone: Timezone,
    ) -> Self {
        Self {
            observations,
            store,
            renderer: None,
            lookup,
            timezone,
        }
    }

    /// Attach the rendering surface
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn WidgetRendererPort>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Station timezone used for daylight and "today"
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Run one cycle now
    pub async fn run(&self, trigger: RefreshTrigger) -> RefreshOutcome {
        self.run_at(trigger, Utc::now()).await
    }

    /// Run one cycle as if the current instant were `now`
    #[instrument(skip(self))]
    pub async fn run_at(&self, trigger: RefreshTrigger, now: DateTime<Utc>) -> RefreshOutcome {
        match self.refresh_at(now).await {
            Ok(CycleReport::Updated(view)) => {
                self.notify(trigger.render_target(), &view).await;
                RefreshOutcome::Success
            },
            Ok(CycleReport::NotConfigured) => {
                info!("Station credentials not configured, skipping refresh");
                if trigger.is_forced() {
                    self.show_stored(trigger.render_target(), now).await;
                }
                RefreshOutcome::Success
            },
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "Refresh failed, stored data left untouched");
                RefreshOutcome::Retry
            },
            Err(e) => {
                info!(error = %e, "Refresh not possible, nothing to retry");
                RefreshOutcome::Success
            },
        }
    }

    /// Fetch, merge, classify, format and persist
    ///
    /// Errors from the primary fetch or the store propagate; hourly history
    /// errors are logged and reconciliation is skipped.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<CycleReport, ApplicationError> {
        let Some(credentials) = self.credentials().await? else {
            return Ok(CycleReport::NotConfigured);
        };

        let today = self.timezone.local_date(now);
        debug!(station_id = credentials.station_id(), %today, "Fetching observations");

        let (current, hourly) = tokio::join!(
            self.observations.fetch_current(&credentials, now),
            self.observations.fetch_today_hourly(&credentials, today, now),
        );
        let current = current?;

        let summary = match hourly {
            Ok(rows) => {
                let summary = HourlyPrecipSummary::for_local_date(&rows, today, &self.timezone);
                if summary.is_none() && !rows.is_empty() {
                    warn!(rows = rows.len(), "Hourly history holds no rows for today, ignoring");
                }
                summary
            },
            Err(e) => {
                warn!(error = %e, "Hourly history unavailable, skipping precipitation reconcile");
                None
            },
        };
        let merged = reconcile(current, summary);

        let local_now = self.timezone.localize(now);
        let is_daylight = display_formatter::resolve_daylight(merged.is_daylight, &local_now);
        let icon = classify(&ClassifierInput::from_observation(&merged, is_daylight));
        let model = display_formatter::build_display_model(
            &merged,
            icon,
            credentials.station_id(),
            &local_now,
        );

        self.store
            .set_all(self.lookup.write_namespace(), &model.to_entries())
            .await?;

        info!(
            station_id = credentials.station_id(),
            %icon,
            temperature = %model.temperature,
            precip = %model.precip_total,
            "Display model persisted"
        );

        let view = display_formatter::render_view(&StoredReadings::from(&model), &local_now);
        Ok(CycleReport::Updated(view))
    }

    /// Format whatever is stored, without fetching
    pub async fn stored_view_at(&self, now: DateTime<Utc>) -> Result<WidgetView, ApplicationError> {
        let stored = self.stored_readings().await?;
        Ok(display_formatter::render_view(&stored, &self.timezone.localize(now)))
    }

    /// Persist station credentials into the write namespace
    #[instrument(skip(self, credentials), fields(station_id = credentials.station_id()))]
    pub async fn save_credentials(
        &self,
        credentials: &StationCredentials,
    ) -> Result<(), ApplicationError> {
        let entries = [
            (keys::API_KEY.to_string(), credentials.api_key().to_string()),
            (keys::STATION_ID.to_string(), credentials.station_id().to_string()),
        ];
        self.store.set_all(self.lookup.write_namespace(), &entries).await?;
        info!("Station credentials saved");
        Ok(())
    }

    async fn credentials(&self) -> Result<Option<StationCredentials>, ApplicationError> {
        let api_key = self.lookup.resolve(self.store.as_ref(), keys::API_KEY).await?;
        let station_id = self.lookup.resolve(self.store.as_ref(), keys::STATION_ID).await?;

        match StationCredentials::from_optional(api_key, station_id) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                debug!(reason = %e, "Credentials incomplete");
                Ok(None)
            },
        }
    }

    async fn stored_readings(&self) -> Result<StoredReadings, ApplicationError> {
        let store = self.store.as_ref();
        let read = |key: &'static str| self.lookup.resolve(store, key);

        Ok(StoredReadings {
            temp: read(keys::TEMP).await?,
            condition: read(keys::CONDITION).await?,
            station: read(keys::STATION).await?,
            precip: read(keys::PRECIP).await?,
            humidity: read(keys::HUMIDITY).await?,
            wind: read(keys::WIND).await?,
            wind_dir: read(keys::WIND_DIR).await?,
            pressure: read(keys::PRESSURE).await?,
            precip_rate: read(keys::PRECIP_RATE).await?,
            dew_point: read(keys::DEW_POINT).await?,
            is_day: read(keys::IS_DAY).await?,
            updated_at_time: read(keys::UPDATED_AT_TIME).await?,
            updated_at_date: read(keys::UPDATED_AT_DATE).await?,
        })
    }

    async fn show_stored(&self, target: RenderTarget, now: DateTime<Utc>) {
        if self.renderer.is_none() {
            return;
        }
        match self.stored_view_at(now).await {
            Ok(view) => self.notify(target, &view).await,
            Err(e) => warn!(error = %e, "Could not read stored data for display"),
        }
    }

    async fn notify(&self, target: RenderTarget, view: &WidgetView) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        if let Err(e) = renderer.render(target, view).await {
            warn!(%target, error = %e, "Renderer failed");
        }
    }
}
