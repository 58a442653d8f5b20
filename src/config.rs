use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "CareOS";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local storage keys (one JSON document each).
pub const SAVED_SEARCHES_KEY: &str = "savedSearches";
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";
pub const SESSION_USER_KEY: &str = "user";

/// Maximum number of recent searches kept, most recent first.
pub const RECENT_SEARCH_LIMIT: usize = 10;

/// Delay standing in for a backend round trip.
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Get the application data directory
/// ~/CareOS/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the SQLite file backing local storage.
pub fn storage_path() -> PathBuf {
    app_data_dir().join("local_storage.db")
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,careos_lib=debug"
}

/// Runtime configuration for a dashboard instance.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding `local_storage.db`.
    pub data_dir: PathBuf,
    /// Latency applied to every simulated backend call.
    pub simulated_latency: Duration,
}

impl DashboardConfig {
    /// Zero latency, data dir unused (tests run on in-memory storage).
    pub fn for_tests() -> Self {
        Self {
            data_dir: std::env::temp_dir().join(APP_NAME),
            simulated_latency: Duration::ZERO,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("local_storage.db")
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: app_data_dir(),
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("CareOS"));
    }

    #[test]
    fn storage_path_under_app_data() {
        let path = storage_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("local_storage.db"));
    }

    #[test]
    fn default_config_uses_one_second_latency() {
        let config = DashboardConfig::default();
        assert_eq!(config.simulated_latency, Duration::from_millis(1000));
        assert_eq!(config.storage_path(), storage_path());
    }

    #[test]
    fn config_for_tests_has_no_latency() {
        assert_eq!(DashboardConfig::for_tests().simulated_latency, Duration::ZERO);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
