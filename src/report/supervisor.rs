//! `monit summary` parsing
//!
//! The summary starts with a header carrying the daemon uptime, then one line
//! per service: `Process 'nginx'        Running`.

use super::{Section, Severity, StatusEntry};
use crate::error::CommunicationError;

pub const SECTION_TITLE: &str = "Supervisor Summary";

/// Split a service line into its name and state.
///
/// The name is the text between the quotes; the state is whatever follows the
/// closing quote and its whitespace. Lines without a quoted name yield `None`.
pub fn parse_service_line(line: &str) -> Option<(&str, &str)> {
    let close = line.char_indices().find_map(|(idx, c)| {
        let rest = &line[idx + c.len_utf8()..];
        (c == '\'' && rest.starts_with(char::is_whitespace)).then_some(idx)
    })?;

    let head = &line[..close];
    let open = head.rfind('\'')?;
    let name = &head[open + 1..];
    let state = line[close + 1..].trim();
    Some((name, state))
}

fn is_system_line(line: &str) -> bool {
    line.split_whitespace().next() == Some("System")
}

pub fn parse_summary(output: &str, marker: &str) -> Result<Section, CommunicationError> {
    if !output.contains(marker) {
        return Err(CommunicationError::MissingMarker {
            marker: marker.to_string(),
        });
    }

    let mut section = Section::new(SECTION_TITLE);
    for line in output.lines().skip(1) {
        if line.trim().is_empty() || is_system_line(line) {
            continue;
        }
        let Some((name, state)) = parse_service_line(line) else {
            continue;
        };
        let state = if state.contains("Online") { "Online" } else { state };
        section.push(StatusEntry::glyph(name, Severity::from_service_state(state)));
    }

    Ok(section)
}
