use thiserror::Error;

/// Main error type for the status reporter
#[derive(Error, Debug)]
pub enum StatuserError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Local metric collection errors
    #[error("Command `{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("Could not parse {what}: {input:?}")]
    Parse { what: &'static str, input: String },

    // Health-check service errors
    #[error(transparent)]
    Communication(#[from] CommunicationError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for StatuserError
pub type Result<T> = std::result::Result<T, StatuserError>;

/// Failure to talk to the supervisor or the discovery agent.
///
/// These never abort a run: the section that hit one prints a single
/// diagnostic line in place of its entries.
#[derive(Error, Debug)]
pub enum CommunicationError {
    #[error("Could not contact supervisor: {0}")]
    SupervisorUnavailable(String),

    #[error("Could not contact supervisor: summary has no `{marker}` line")]
    MissingMarker { marker: String },

    #[error("Could not contact discovery agent: {0}")]
    DiscoveryRequest(#[from] reqwest::Error),

    #[error("Discovery agent answered with HTTP {0}")]
    DiscoveryStatus(u16),

    #[error("Malformed discovery response: {0}")]
    DiscoveryDecode(#[from] serde_json::Error),
}

impl StatuserError {
    pub(crate) fn parse(what: &'static str, input: impl Into<String>) -> Self {
        StatuserError::Parse {
            what,
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_communication_error_is_transparent() {
        let err: StatuserError = CommunicationError::MissingMarker {
            marker: "uptime".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Could not contact supervisor: summary has no `uptime` line"
        );
    }

    #[test]
    fn test_parse_error_quotes_input() {
        let err = StatuserError::parse("load average", "n/a\n");
        assert_eq!(err.to_string(), "Could not parse load average: \"n/a\\n\"");
    }
}
