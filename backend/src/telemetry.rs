//! Prometheus metrics
//!
//! The recorder is process-global; the first caller installs it and every
//! later caller shares the same handle.

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::warn;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder (once) and return its render handle
pub fn metrics_handle() -> Result<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                warn!("A metrics recorder was already installed; /metrics will be empty");
            }
            Ok(handle)
        })
        .cloned()
}
