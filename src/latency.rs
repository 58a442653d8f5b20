//! Stand-in for the backend round trip the dashboard fakes with a timer.

use std::time::Duration;

/// Wait out the configured latency. Zero returns at once.
pub async fn simulated_call(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
