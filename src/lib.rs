pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod sources;

pub use cli::Cli;
pub use config::StatuserConfig;
pub use error::{CommunicationError, Result, StatuserError};
pub use report::{
    ColumnFormatter, DisplayStyle, Reporter, Section, Severity, StatusEntry, Thresholds,
    DEFAULT_STYLE,
};
pub use sources::{
    CommandMetricsSource, HealthCheckClient, LocalHealthCheckClient, SystemMetricsSource,
};
