use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::SystemMetricsSource;
use crate::error::{Result, StatuserError};

const LOADAVG_PATH: &str = "/proc/loadavg";

/// Run `program` and return its stdout.
///
/// With `require_success` unset a non-zero exit is tolerated as long as the
/// command printed something, which `df` does when a single mount is
/// unreadable.
pub(crate) async fn run_command(
    program: &str,
    args: &[&str],
    require_success: bool,
) -> Result<String> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %command_line, "spawning");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| StatuserError::Command {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() && (require_success || stdout.trim().is_empty()) {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StatuserError::Command {
            command: command_line,
            reason: format!("{} {}", output.status, stderr.trim()),
        });
    }

    Ok(stdout)
}

/// Reads metrics by shelling out to the usual Linux utilities
#[derive(Debug, Clone, Default)]
pub struct CommandMetricsSource;

impl CommandMetricsSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SystemMetricsSource for CommandMetricsSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn uptime(&self) -> Result<String> {
        run_command("uptime", &[], true).await
    }

    async fn os_release(&self) -> Result<String> {
        run_command("lsb_release", &["-s", "-d"], true).await
    }

    async fn kernel_version(&self) -> Result<String> {
        run_command("uname", &["-r"], true).await
    }

    async fn load_average(&self) -> Result<String> {
        debug!(path = LOADAVG_PATH, "reading");
        Ok(tokio::fs::read_to_string(LOADAVG_PATH).await?)
    }

    async fn disk_usage(&self) -> Result<String> {
        run_command("df", &["-hP"], false).await
    }

    async fn memory_usage(&self) -> Result<String> {
        run_command("free", &["-m"], true).await
    }

    async fn logged_in_users(&self) -> Result<String> {
        run_command("users", &[], true).await
    }
}
