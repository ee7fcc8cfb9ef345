use crate::config::Observability;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("tracing subscriber already set: {0}")]
    Subscriber(String),
    #[error("metrics recorder: {0}")]
    Metrics(#[from] BuildError),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(settings: &Observability) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .map_err(|e| ObservabilityError::Filter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).flatten_event(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };
    result.map_err(|e| ObservabilityError::Subscriber(e.to_string()))?;

    tracing::info!(
        service = %settings.service_name,
        filter = %settings.log_level,
        json = settings.json_logs,
        "logging_initialized"
    );
    Ok(())
}

/// Install the Prometheus recorder when metrics are enabled.
pub fn init_metrics(settings: &Observability) -> Result<Option<PrometheusHandle>, ObservabilityError> {
    if !settings.enable_metrics {
        return Ok(None);
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(Some(handle))
}
