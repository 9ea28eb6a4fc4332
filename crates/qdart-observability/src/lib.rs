use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
    pub metrics_addr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityHandle {
    pub service_name: String,
    pub metrics_enabled: bool,
}

/// Installs the global tracing subscriber and, when an exporter address is
/// configured, the Prometheus recorder. Call once per process before any
/// engine work.
pub fn init(config: &ObservabilityConfig) -> ObservabilityHandle {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    let metrics_enabled = init_metrics(config);
    if metrics_enabled {
        describe_metrics();
    }

    ObservabilityHandle {
        service_name: config.service_name.clone(),
        metrics_enabled,
    }
}

pub fn log_startup(handle: &ObservabilityHandle, environment: &str) {
    tracing::info!(
        service = %handle.service_name,
        environment = %environment,
        metrics_enabled = handle.metrics_enabled,
        "QuickDART service starting"
    );
}

/// Counter families the coordination engine emits.
fn describe_metrics() {
    describe_counter!(
        "qdart_reports_created_total",
        "Disaster reports accepted by the coordination engine"
    );
    describe_counter!(
        "qdart_deployments_total",
        "Team and asset status transitions committed"
    );
}

fn init_metrics(config: &ObservabilityConfig) -> bool {
    let Some(raw_addr) = config.metrics_addr.as_ref() else {
        return false;
    };
    let listen_addr: SocketAddr = match raw_addr.parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                error = %err,
                "Invalid QDART_METRICS_ADDR value"
            );
            return false;
        }
    };

    let install = PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .add_global_label("service", config.service_name.clone())
        .add_global_label("environment", config.environment.clone())
        .install();

    match install {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                error = %err,
                "Failed to initialize Prometheus exporter"
            );
            false
        }
    }
}
