pub mod config;
pub mod dashboard;
pub mod events;
pub mod models;
pub mod source;
pub mod sync;
pub mod track;
mod utils;
pub mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::AppConfig;
use events::{EventSink, LogSink};
use source::HttpReportSource;
use sync::SyncController;
use track::{Breakpoint, BreakpointProvider, FixedBreakpoint, SectionLayout, SOLAPUR_WADI};

pub use sync::commands::{get_sync_state, retry_sync};
pub use track::commands::get_track_view;
pub use view::commands::{get_dashboard_summary, query_trains};

/// Everything the presentation bridge needs to answer commands.
pub struct AppState {
    pub(crate) sync: SyncController,
    pub(crate) section: SectionLayout,
    pub(crate) breakpoint: Arc<dyn BreakpointProvider>,
}

impl AppState {
    pub fn new(
        sync: SyncController,
        section: SectionLayout,
        breakpoint: Arc<dyn BreakpointProvider>,
    ) -> Self {
        Self {
            sync,
            section,
            breakpoint,
        }
    }

    pub fn from_config(
        config: &AppConfig,
        sink: Arc<dyn EventSink>,
        breakpoint: Arc<dyn BreakpointProvider>,
    ) -> Result<Self> {
        SOLAPUR_WADI.validate()?;

        let source = HttpReportSource::new(&config.api_base_url, config.sync.request_timeout)?;
        log::info!("polling {}", source.url());

        let sync = SyncController::new(Arc::new(source), sink, config.sync);
        Ok(Self::new(sync, SOLAPUR_WADI, breakpoint))
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // RUST_LOG, when set, wins over the default level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Headless entry point: polls the backend and logs every state change
/// until interrupted.
pub fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(config.debug);

    log::info!("railwatch starting up...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    runtime.block_on(async move {
        let state = AppState::from_config(
            &config,
            Arc::new(LogSink),
            Arc::new(FixedBreakpoint(Breakpoint::Wide)),
        )?;

        state.sync.start().await;

        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for ctrl-c")?;

        log::info!("shutdown requested");
        state.sync.shutdown().await;
        Ok(())
    })
}
