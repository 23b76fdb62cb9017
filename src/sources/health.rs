use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::command::run_command;
use super::HealthCheckClient;
use crate::config::StatuserConfig;
use crate::error::{CommunicationError, StatuserError};

/// Talks to the supervisor CLI and the discovery agent on this host
#[derive(Debug, Clone)]
pub struct LocalHealthCheckClient {
    supervisor_command: Vec<String>,
    discovery_url: String,
    http: reqwest::Client,
}

impl LocalHealthCheckClient {
    pub fn new(
        supervisor_command: Vec<String>,
        discovery_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> crate::error::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CommunicationError::from)?;

        Ok(Self {
            supervisor_command,
            discovery_url: discovery_url.into(),
            http,
        })
    }

    pub fn from_config(config: &StatuserConfig) -> crate::error::Result<Self> {
        Self::new(
            config.supervisor_argv().into_iter().map(String::from).collect(),
            config.discovery.url.clone(),
            config.discovery.timeout_secs.map(Duration::from_secs),
        )
    }
}

#[async_trait]
impl HealthCheckClient for LocalHealthCheckClient {
    async fn supervisor_summary(&self) -> Result<String, CommunicationError> {
        let Some((program, args)) = self.supervisor_command.split_first() else {
            return Err(CommunicationError::SupervisorUnavailable(
                "no supervisor command configured".to_string(),
            ));
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        // The summary is judged by its content, not the exit status.
        run_command(program, &args, false).await.map_err(|e| match e {
            StatuserError::Command { reason, .. } => CommunicationError::SupervisorUnavailable(reason),
            other => CommunicationError::SupervisorUnavailable(other.to_string()),
        })
    }

    async fn agent_checks(&self) -> Result<String, CommunicationError> {
        debug!(url = %self.discovery_url, "requesting agent checks");
        let response = self.http.get(&self.discovery_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommunicationError::DiscoveryStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_supervisor_summary_returns_stdout() {
        let client = LocalHealthCheckClient::new(
            vec!["echo".to_string(), "uptime: 1m".to_string()],
            "http://127.0.0.1:1/v1/agent/checks",
            None,
        )
        .unwrap();
        assert_eq!(client.supervisor_summary().await.unwrap(), "uptime: 1m\n");
    }

    #[tokio::test]
    async fn test_missing_supervisor_binary() {
        let client = LocalHealthCheckClient::new(
            vec!["statuser-no-such-monit".to_string()],
            "http://127.0.0.1:1/v1/agent/checks",
            None,
        )
        .unwrap();
        assert!(matches!(
            client.supervisor_summary().await,
            Err(CommunicationError::SupervisorUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_supervisor_command() {
        let client =
            LocalHealthCheckClient::new(Vec::new(), "http://127.0.0.1:1/", None).unwrap();
        assert!(client.supervisor_summary().await.is_err());
    }

    #[test]
    fn test_from_default_config() {
        let client = LocalHealthCheckClient::from_config(&StatuserConfig::default()).unwrap();
        assert_eq!(client.supervisor_command, vec!["monit", "summary"]);
        assert_eq!(client.discovery_url, "http://localhost:8500/v1/agent/checks");
    }
}
