//! Consul agent check parsing

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Section, Severity, StatusEntry};
use crate::error::CommunicationError;

pub const SECTION_TITLE: &str = "Discovery Checks";

/// One record of `/v1/agent/checks`
#[derive(Debug, Clone, Deserialize)]
pub struct AgentCheck {
    #[serde(rename = "Status")]
    pub status: String,
}

/// Check ID with its leading segment dropped: `service:web:1` becomes `web:1`
pub fn check_label(check_id: &str) -> &str {
    match check_id.split_once(':') {
        Some((_, rest)) => rest,
        None => check_id,
    }
}

pub fn parse_checks(body: &str) -> Result<Section, CommunicationError> {
    let checks: Map<String, Value> = serde_json::from_str(body)?;

    let mut section = Section::new(SECTION_TITLE);
    for (check_id, record) in checks {
        let check: AgentCheck = serde_json::from_value(record)?;
        section.push(StatusEntry::glyph(
            check_label(&check_id),
            Severity::from_check_status(&check.status),
        ));
    }

    Ok(section)
}
