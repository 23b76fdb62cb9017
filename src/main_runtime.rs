use statuser::config::StatuserConfig;
use statuser::error::{Result, StatuserError};
use statuser::{CommandMetricsSource, LocalHealthCheckClient, Reporter};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout carries only the report
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

pub fn load_config(config_dir: &std::path::Path) -> Result<StatuserConfig> {
    let config = StatuserConfig::load_from(config_dir)?;
    config
        .validate()
        .map_err(|errors| StatuserError::InvalidConfig(errors.join("; ")))?;
    Ok(config)
}

pub fn build_reporter(
    config: StatuserConfig,
) -> Result<Reporter<CommandMetricsSource, LocalHealthCheckClient>> {
    let health = LocalHealthCheckClient::from_config(&config)?;
    Ok(Reporter::new(CommandMetricsSource::new(), health, config))
}
