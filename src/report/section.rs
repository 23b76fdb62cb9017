use super::Severity;

/// One line item of a report section
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusEntry {
    pub label: String,
    pub severity: Severity,
    /// Shown right-aligned; the severity glyph stands in when absent
    pub value: Option<String>,
}

impl StatusEntry {
    pub fn new(label: impl Into<String>, severity: Severity, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            severity,
            value: Some(value.into()),
        }
    }

    /// Entry rendered with its severity glyph only
    pub fn glyph(label: impl Into<String>, severity: Severity) -> Self {
        Self {
            label: label.into(),
            severity,
            value: None,
        }
    }
}

/// A titled block of entries, printed two per line
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    title: String,
    entries: Vec<StatusEntry>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry unless an identical one is already present
    pub fn push(&mut self, entry: StatusEntry) {
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<StatusEntry> for Section {
    fn extend<T: IntoIterator<Item = StatusEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_first_occurrence_in_order() {
        let mut section = Section::new("Supervisor Summary");
        section.extend([
            StatusEntry::glyph("nginx", Severity::Good),
            StatusEntry::glyph("redis", Severity::Bad),
            StatusEntry::glyph("nginx", Severity::Good),
            StatusEntry::glyph("nginx", Severity::Bad),
        ]);

        let labels: Vec<_> = section
            .entries()
            .iter()
            .map(|e| (e.label.as_str(), e.severity))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("nginx", Severity::Good),
                ("redis", Severity::Bad),
                ("nginx", Severity::Bad),
            ]
        );
    }
}
