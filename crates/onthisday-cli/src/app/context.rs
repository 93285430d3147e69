//! Application context for the On This Day CLI.
//!
//! Bundles the parsed CLI arguments, the resolved settings, the async
//! runtime and the session's `AppState`, so command handlers take a single
//! parameter.

use std::sync::Arc;

use onthisday_core::{AppState, ClientConfig, DateKey, Day, HttpDayClient};
use tokio::runtime::Runtime;

use crate::cli::Cli;
use crate::config::{write_config, AppConfig, ViewMode};
use crate::helpers::OutputFormat;
use crate::ui::{OutputRequest, Spinner, UiContext};

use super::resolver::{load_config, resolve_config_path, ConfigLocation, Settings};

/// Application context shared by all command handlers.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config_location: ConfigLocation,
    config: AppConfig,
    settings: Settings,
    runtime: Runtime,
    state: Arc<AppState>,
}

impl<'a> AppContext<'a> {
    /// Load config, resolve settings and start an empty session.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_location = resolve_config_path()?;
        let config = load_config(&config_location)?;
        let settings = Settings::resolve(cli, &config);

        let client = HttpDayClient::new(
            ClientConfig::with_base_url(settings.base_url.clone()).timeout(settings.timeout),
        )?;
        tracing::info!(base_url = %client.base_url(), "session started");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to start async runtime: {}", e))?;

        Ok(Self {
            cli,
            config_location,
            config,
            settings,
            runtime,
            state: Arc::new(AppState::new(Arc::new(client))),
        })
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Resolve output mode and list layout for a command's output flags,
    /// falling back to the saved view preference.
    pub fn ui_context(
        &self,
        json: bool,
        format: Option<OutputFormat>,
        view: Option<ViewMode>,
    ) -> UiContext {
        let request = OutputRequest {
            json,
            format,
            view,
            no_color: self.cli.no_color,
            ascii: self.cli.ascii,
        };
        UiContext::from_env(request, self.settings.view)
    }

    /// Return `date` from the session cache, fetching it if needed.
    ///
    /// A spinner is drawn for as long as the session reports loading.
    pub fn fetch_day(&self, ui: &UiContext, date: DateKey) -> anyhow::Result<Arc<Day>> {
        if let Some(day) = self.state.cached(date) {
            return Ok(day);
        }

        let spinner = Spinner::new(ui, &format!("Loading {}", date));
        let outcome = self.runtime.block_on(async {
            let mut loading = self.state.subscribe_loading();
            let fetch = self.state.get_or_fetch(date.month, date.day);
            tokio::pin!(fetch);
            let mut watching = true;
            loop {
                tokio::select! {
                    outcome = &mut fetch => break outcome,
                    changed = loading.changed(), if watching => {
                        if changed.is_err() {
                            watching = false;
                            continue;
                        }
                        if *loading.borrow_and_update() {
                            spinner.show();
                        } else {
                            spinner.clear();
                        }
                    }
                }
            }
        });
        spinner.clear();

        let day = outcome?;
        tracing::info!(date = %date, total = day.total(), "day loaded");
        Ok(day)
    }

    /// Persist view preferences to the config file.
    pub fn save_preferences(&self, view: ViewMode, show_totals: bool) -> anyhow::Result<()> {
        let mut config = self.config.clone();
        if config.ui.view == view && config.ui.show_totals == show_totals {
            return Ok(());
        }
        config.ui.view = view;
        config.ui.show_totals = show_totals;
        write_config(&self.config_location.path, &config)?;
        tracing::info!(path = %self.config_location.path.display(), "preferences saved");
        Ok(())
    }
}

impl Drop for AppContext<'_> {
    fn drop(&mut self) {
        self.state.shutdown();
    }
}
