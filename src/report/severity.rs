use serde::Deserialize;

/// Classification driving the color and glyph of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Good,
    Warning,
    Bad,
}

impl Severity {
    /// Supervisor service state; only `Online` and `Running` are healthy
    pub fn from_service_state(state: &str) -> Self {
        match state {
            "Online" | "Running" => Severity::Good,
            _ => Severity::Bad,
        }
    }

    /// Discovery agent check status
    pub fn from_check_status(status: &str) -> Self {
        match status {
            "passing" => Severity::Good,
            "warning" => Severity::Warning,
            _ => Severity::Bad,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Good => write!(f, "good"),
            Severity::Warning => write!(f, "warning"),
            Severity::Bad => write!(f, "bad"),
        }
    }
}

/// Upper bounds (inclusive) for the good and warning bands
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    pub good: f64,
    pub warning: f64,
}

impl Thresholds {
    /// Disk and memory usage percentages
    pub fn usage() -> Self {
        Self {
            good: 80.0,
            warning: 95.0,
        }
    }

    /// 1-minute load average
    pub fn load() -> Self {
        Self {
            good: 0.8,
            warning: 0.95,
        }
    }

    pub fn classify(&self, value: f64) -> Severity {
        if value <= self.good {
            Severity::Good
        } else if value <= self.warning {
            Severity::Warning
        } else {
            Severity::Bad
        }
    }
}
