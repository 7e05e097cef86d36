//! Telemetry Setup - structured logging and optional OpenTelemetry export
//! Phase 4: Production observability

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing stack for the daemon.
///
/// Log format is controlled by `TRADEPOST_LOG_FORMAT` (`json` or `pretty`,
/// default `pretty` - ADR-050). Verbosity comes from `RUST_LOG`, falling back
/// to `tradepost=info`.
///
/// When built with the `telemetry` feature and `OTEL_EXPORTER_OTLP_ENDPOINT`
/// is set, spans are additionally exported over OTLP:
///
/// ```text
/// OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317 \
/// OTEL_SERVICE_NAME=tradepost-dev \
///     ./tradepostd
/// ```
pub fn init_logging() -> Result<()> {
    let log_format =
        std::env::var("TRADEPOST_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    // The OTLP layer has to join the registry before init, so the exporting
    // stack is assembled here rather than layered on afterwards.
    #[cfg(feature = "telemetry")]
    if let Some(tracer) = build_tracer()? {
        match log_format.as_str() {
            "json" => tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().json())
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init(),
            _ => tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().pretty())
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init(),
        }
        tracing::info!("OpenTelemetry span export enabled");
        return Ok(());
    }

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt::layer().json())
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt::layer().pretty())
            .init(),
    }

    #[cfg(not(feature = "telemetry"))]
    if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        tracing::warn!("OTEL_EXPORTER_OTLP_ENDPOINT set but feature 'telemetry' not enabled");
        tracing::warn!("Rebuild with: cargo build --features telemetry");
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tradepost=info"))
}

/// Build an OTLP tracer, or `None` when no endpoint is configured.
#[cfg(feature = "telemetry")]
fn build_tracer() -> Result<Option<opentelemetry_sdk::trace::Tracer>> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        return Ok(None);
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "tradepost".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()?;

    let provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
            "service.name",
            service_name.clone(),
        )]))
        .build();

    Ok(Some(provider.tracer(service_name)))
}
