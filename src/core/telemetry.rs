use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::TelemetrySettings;

pub(crate) fn init_tracing(telemetry: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(telemetry.log_level.clone()));

    let builder = fmt().with_env_filter(filter).with_target(false);

    let installed = if telemetry.json {
        builder.json().with_span_events(fmt::format::FmtSpan::CLOSE).try_init()
    } else {
        builder.with_span_events(fmt::format::FmtSpan::CLOSE).try_init()
    };
    installed.map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(())
}
