//! Collaborators the reporter reads from
//!
//! Both traits hand back the raw text of the underlying tool so that parsing
//! and classification stay in [`crate::report`] and can be exercised with
//! fixed samples.

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::{CommunicationError, Result};

pub mod command;
pub mod health;

pub use command::CommandMetricsSource;
pub use health::LocalHealthCheckClient;

/// Local OS readings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemMetricsSource: Send + Sync {
    /// Wall clock used for the `Time` line
    fn now(&self) -> DateTime<Local>;

    /// Output of `uptime`
    async fn uptime(&self) -> Result<String>;

    /// Output of `lsb_release -s -d`
    async fn os_release(&self) -> Result<String>;

    /// Output of `uname -r`
    async fn kernel_version(&self) -> Result<String>;

    /// Contents of `/proc/loadavg`
    async fn load_average(&self) -> Result<String>;

    /// Output of `df -hP`
    async fn disk_usage(&self) -> Result<String>;

    /// Output of `free -m`
    async fn memory_usage(&self) -> Result<String>;

    /// Output of `users`
    async fn logged_in_users(&self) -> Result<String>;
}

/// External health-check services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthCheckClient: Send + Sync {
    /// Supervisor summary text
    async fn supervisor_summary(&self) -> std::result::Result<String, CommunicationError>;

    /// Body of the discovery agent's health-check endpoint
    async fn agent_checks(&self) -> std::result::Result<String, CommunicationError>;
}
