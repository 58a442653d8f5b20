pub mod appointment; // Status state machine, check-in, booking, reports
pub mod auth; // Demo credential directory
pub mod commands;
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod db;
pub mod latency; // Simulated backend round trip
pub mod models;
pub mod navigation; // Role-gated sidebar
pub mod sample_data;
pub mod search; // Filter, sort, draft/active state, history
pub mod session;
pub mod storage; // Local key-value store

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::DashboardConfig;
use crate::core_state::{CoreError, CoreState};

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// default filter. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Start the dashboard core: logging, on-disk store, restored session.
pub fn start(config: DashboardConfig) -> Result<Arc<CoreState>, CoreError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    Ok(Arc::new(CoreState::open(config)?))
}
