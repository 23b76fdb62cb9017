//! The status report: three sections collected and printed in order

pub mod discovery;
pub mod format;
pub mod section;
pub mod severity;
pub mod supervisor;
pub mod system;

pub use format::{combine_columns, truncate, ColumnFormatter, DisplayStyle, Palette, DEFAULT_STYLE};
pub use section::{Section, StatusEntry};
pub use severity::{Severity, Thresholds};
pub use system::{SystemRules, SystemSnapshot};

use std::io::Write;
use tracing::{debug, warn};

use crate::config::StatuserConfig;
use crate::error::{CommunicationError, Result};
use crate::sources::{HealthCheckClient, SystemMetricsSource};

/// Collects every section from its collaborators and prints it
pub struct Reporter<S, H> {
    metrics: S,
    health: H,
    config: StatuserConfig,
    formatter: ColumnFormatter,
}

impl<S, H> Reporter<S, H>
where
    S: SystemMetricsSource,
    H: HealthCheckClient,
{
    pub fn new(metrics: S, health: H, config: StatuserConfig) -> Self {
        let formatter = ColumnFormatter::new(DEFAULT_STYLE, config.display.color);
        Self {
            metrics,
            health,
            config,
            formatter,
        }
    }

    pub fn with_formatter(mut self, formatter: ColumnFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Read the host and build `System Info`
    pub async fn system_section(&self) -> Result<Section> {
        let snapshot = SystemSnapshot {
            time: self.metrics.now().format(system::TIME_FORMAT).to_string(),
            uptime: system::parse_uptime(&self.metrics.uptime().await?),
            release: system::parse_release(&self.metrics.os_release().await?),
            kernel: self.metrics.kernel_version().await?.trim().to_string(),
            environment: self.config.system.environment.clone(),
            load: system::parse_load_average(&self.metrics.load_average().await?)?,
            disks: system::parse_disk_usage(&self.metrics.disk_usage().await?),
            memory: system::parse_memory_usage(&self.metrics.memory_usage().await?)?,
            users: system::parse_user_count(&self.metrics.logged_in_users().await?),
        };
        debug!(?snapshot, "system snapshot");

        let rules = SystemRules {
            usage: self.config.thresholds.usage,
            load: self.config.thresholds.load,
            secondary_mount: self.config.system.secondary_mount.as_deref(),
        };
        Ok(snapshot.into_section(&rules))
    }

    pub async fn supervisor_section(&self) -> std::result::Result<Section, CommunicationError> {
        let output = self.health.supervisor_summary().await?;
        supervisor::parse_summary(&output, &self.config.supervisor.marker)
    }

    pub async fn discovery_section(&self) -> std::result::Result<Section, CommunicationError> {
        let body = self.health.agent_checks().await?;
        discovery::parse_checks(&body)
    }

    /// Any failure here ends the run
    pub async fn print_system_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let section = self.system_section().await?;
        self.formatter.write_section(out, &section)?;
        Ok(())
    }

    pub async fn print_supervisor_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let section = self.supervisor_section().await;
        self.print_or_report(out, "Supervisor", section)
    }

    pub async fn print_discovery_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let section = self.discovery_section().await;
        self.print_or_report(out, "Discovery", section)
    }

    fn print_or_report<W: Write>(
        &self,
        out: &mut W,
        name: &str,
        section: std::result::Result<Section, CommunicationError>,
    ) -> Result<()> {
        match section {
            Ok(section) => self.formatter.write_section(out, &section)?,
            Err(e) => {
                warn!(section = name, error = %e, "section unavailable");
                self.formatter
                    .write_error(out, &format!("{name} error: {e}"))?;
            }
        }
        Ok(())
    }

    /// Print all three sections, system first
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        self.print_system_status(out).await?;
        self.print_supervisor_status(out).await?;
        self.print_discovery_status(out).await?;
        out.flush()?;
        Ok(())
    }
}
