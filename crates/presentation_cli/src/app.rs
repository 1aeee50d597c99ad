//! Wiring from configuration to a ready refresh service

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::ports::{PreferenceStorePort, WidgetRendererPort};
use application::{RefreshOutcome, RefreshService, RefreshTrigger};
use chrono::Utc;
use domain::{StationCredentials, WidgetId};
use infrastructure::{
    AppConfig, InMemoryPreferenceStore, PwsObservationAdapter, REFRESH_TASK, RefreshTask,
    SqlitePreferenceStore, TaskScheduler, create_pool,
};
use tracing::{info, warn};

use crate::renderer::format_view;

/// How long shutdown waits for a cycle that is still running
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Assembled application
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    service: Arc<RefreshService>,
}

impl App {
    /// Build the refresh service described by `config`
    ///
    /// With `ephemeral` the preference store lives in memory only.
    pub fn build(
        config: AppConfig,
        ephemeral: bool,
        renderer: Arc<dyn WidgetRendererPort>,
    ) -> anyhow::Result<Self> {
        let store: Arc<dyn PreferenceStorePort> = if ephemeral {
            info!("Using in-memory preference store");
            Arc::new(InMemoryPreferenceStore::new())
        } else {
            let pool = create_pool(&config.store)
                .with_context(|| format!("opening preference store {}", config.store.path))?;
            Arc::new(SqlitePreferenceStore::new(Arc::new(pool)))
        };

        let observations = PwsObservationAdapter::new(config.pws.clone())
            .context("creating PWS client")?;
        let timezone = config
            .station
            .timezone()
            .context("reading station timezone")?;

        let service = RefreshService::new(
            Arc::new(observations),
            store,
            config.store.lookup_chain(),
            timezone,
        )
        .with_renderer(renderer);

        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }

    /// Loaded configuration
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run a single cycle
    pub async fn refresh(&self, force: bool, target: Option<WidgetId>) -> RefreshOutcome {
        self.service
            .run(RefreshTrigger::from_request(force, target))
            .await
    }

    /// Stored data as text, or as JSON
    pub async fn show(&self, json: bool) -> anyhow::Result<String> {
        let view = self
            .service
            .stored_view_at(Utc::now())
            .await
            .context("reading stored widget data")?;
        if json {
            Ok(serde_json::to_string_pretty(&view)?)
        } else {
            Ok(format_view(&view, self.config.station.compact_label))
        }
    }

    /// Validate and store station credentials
    pub async fn configure(&self, api_key: &str, station_id: &str) -> anyhow::Result<()> {
        let credentials = StationCredentials::new(api_key, station_id)?;
        self.service
            .save_credentials(&credentials)
            .await
            .context("saving credentials")?;
        Ok(())
    }

    /// Refresh on schedule until `shutdown` resolves
    pub async fn daemon(&self, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
        let task = RefreshTask::new(
            Arc::clone(&self.service),
            self.config.retry.to_retry_config(),
        );

        let scheduler = TaskScheduler::new().await?;
        scheduler
            .add_task(REFRESH_TASK, &self.config.schedule.cron, task.job())
            .await?;
        scheduler.start().await?;

        let initial = self.config.schedule.refresh_on_start.then(|| {
            let task = task.clone();
            tokio::spawn(async move {
                task.run_once(RefreshTrigger::Scheduled).await;
            })
        });

        info!(cron = %self.config.schedule.cron, "Daemon running, Ctrl-C to stop");
        shutdown.await;

        info!("Shutting down");
        if let Err(e) = scheduler.stop().await {
            warn!(error = %e, "Scheduler did not stop cleanly");
        }

        if let Some(mut handle) = initial {
            match tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await {
                Ok(Ok(())) => {},
                Ok(Err(e)) => warn!(error = %e, "Startup refresh did not finish"),
                Err(_) => {
                    warn!("Startup refresh still running, aborting");
                    handle.abort();
                },
            }
        }
        Ok(())
    }
}
