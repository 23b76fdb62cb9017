//! Fixed-width two-column rendering of report sections
//!
//! Each entry becomes `label ·······… value`, padded so the value lines up at
//! the right edge of its column. Two columns share a line, joined by ` | `.

use crossterm::style::{style, Attribute, Color, Stylize};
use std::io::{self, Write};

use super::{Section, Severity, StatusEntry};

/// Foreground/background pair for one severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
}

/// Layout, glyphs and colors of the report
#[derive(Debug, Clone, Copy)]
pub struct DisplayStyle {
    /// Total line width both columns are sized against
    pub max_width: usize,
    /// Labels and values longer than this are truncated
    pub max_word_length: usize,
    pub check_mark: char,
    pub warning_mark: char,
    pub x_mark: char,
    pub spacer: char,
    pub truncator: char,
    pub good: Palette,
    pub warning: Palette,
    pub bad: Palette,
}

pub const DEFAULT_STYLE: DisplayStyle = DisplayStyle {
    max_width: 80,
    max_word_length: 26,
    check_mark: '✓',
    warning_mark: '⚠',
    x_mark: '✗',
    spacer: '·',
    truncator: '…',
    good: Palette {
        fg: Color::Green,
        bg: Color::Reset,
    },
    warning: Palette {
        fg: Color::Yellow,
        bg: Color::Reset,
    },
    bad: Palette {
        fg: Color::Black,
        bg: Color::Red,
    },
};

impl DisplayStyle {
    /// Width budget of a single column
    pub const fn column_width(&self) -> usize {
        self.max_width / 2 - 3
    }

    pub fn glyph(&self, severity: Severity) -> char {
        match severity {
            Severity::Good => self.check_mark,
            Severity::Warning => self.warning_mark,
            Severity::Bad => self.x_mark,
        }
    }

    pub fn palette(&self, severity: Severity) -> Palette {
        match severity {
            Severity::Good => self.good,
            Severity::Warning => self.warning,
            Severity::Bad => self.bad,
        }
    }
}

impl Default for DisplayStyle {
    fn default() -> Self {
        DEFAULT_STYLE
    }
}

/// Strip newlines and cap `text` at `max` characters.
///
/// Anything longer keeps its first `max - 1` characters followed by
/// `truncator`, so the result is never wider than `max`.
pub fn truncate(text: &str, max: usize, truncator: char) -> String {
    let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    if text.chars().count() <= max {
        return text;
    }

    let mut truncated: String = text.chars().take(max.saturating_sub(1)).collect();
    truncated.push(truncator);
    truncated
}

/// Join two formatted columns; an odd trailing column stands alone
pub fn combine_columns(left: &str, right: Option<&str>) -> String {
    match right {
        Some(right) => format!("{left} | {right}"),
        None => left.to_string(),
    }
}

/// Renders entries and sections with a [`DisplayStyle`]
#[derive(Debug, Clone, Copy)]
pub struct ColumnFormatter {
    style: DisplayStyle,
    color: bool,
}

impl ColumnFormatter {
    pub fn new(style: DisplayStyle, color: bool) -> Self {
        Self { style, color }
    }

    pub fn format_entry(&self, entry: &StatusEntry) -> String {
        let value = match &entry.value {
            Some(value) => value.clone(),
            None => self.style.glyph(entry.severity).to_string(),
        };

        let label = truncate(&entry.label, self.style.max_word_length, self.style.truncator);
        let value = truncate(&value, self.style.max_word_length, self.style.truncator);

        let used = label.chars().count() + value.chars().count() + 1;
        let spacers = self.style.column_width().saturating_sub(used).max(1);
        let filler: String = std::iter::repeat(self.style.spacer).take(spacers).collect();

        format!("{label} {filler} {}", self.paint_value(&value, entry.severity))
    }

    fn paint_value(&self, value: &str, severity: Severity) -> String {
        if !self.color {
            return value.to_string();
        }
        let palette = self.style.palette(severity);
        style(value).with(palette.fg).on(palette.bg).to_string()
    }

    pub fn title(&self, title: &str) -> String {
        if !self.color {
            return title.to_string();
        }
        style(title)
            .with(Color::White)
            .attribute(Attribute::Bold)
            .attribute(Attribute::Underlined)
            .to_string()
    }

    pub fn error_line(&self, message: &str) -> String {
        if !self.color {
            return message.to_string();
        }
        style(message)
            .with(Color::Red)
            .attribute(Attribute::Underlined)
            .to_string()
    }

    /// Every line of `section`, title first, without the trailing blank line
    pub fn section_lines(&self, section: &Section) -> Vec<String> {
        let columns: Vec<String> = section
            .entries()
            .iter()
            .map(|entry| self.format_entry(entry))
            .collect();

        let mut lines = Vec::with_capacity(columns.len() / 2 + 2);
        lines.push(self.title(section.title()));
        lines.extend(
            columns
                .chunks(2)
                .map(|pair| combine_columns(&pair[0], pair.get(1).map(String::as_str))),
        );
        lines
    }

    pub fn write_section<W: Write>(&self, out: &mut W, section: &Section) -> io::Result<()> {
        for line in self.section_lines(section) {
            writeln!(out, "{line}")?;
        }
        writeln!(out)
    }

    pub fn write_error<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", self.error_line(message))?;
        writeln!(out)
    }
}

impl Default for ColumnFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ColumnFormatter {
        ColumnFormatter::new(DEFAULT_STYLE, false)
    }

    fn width(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_column_width() {
        assert_eq!(DEFAULT_STYLE.column_width(), 37);
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        let exact = "a".repeat(26);
        assert_eq!(truncate(&exact, 26, '…'), exact);
        assert_eq!(truncate("Kernel", 26, '…'), "Kernel");
    }

    #[test]
    fn test_truncate_long_strings() {
        let long = "abcdefghijklmnopqrstuvwxyz0123";
        let truncated = truncate(long, 26, '…');
        assert_eq!(truncated, "abcdefghijklmnopqrstuvwxy…");
        assert_eq!(width(&truncated), 26);
    }

    #[test]
    fn test_truncate_strips_newlines_first() {
        assert_eq!(truncate("5.15.0-91-generic\n", 26, '…'), "5.15.0-91-generic");
        let wrapped = format!("{}\n", "x".repeat(26));
        assert_eq!(truncate(&wrapped, 26, '…'), "x".repeat(26));
    }

    #[test]
    fn test_truncate_counts_characters() {
        let accented = "é".repeat(26);
        assert_eq!(truncate(&accented, 26, '…'), accented);
    }

    #[test]
    fn test_format_entry_fixed_width() {
        let formatter = plain();
        for (label, value) in [
            ("Time", "19 Oct 26 10:00:00 +00:00"),
            ("Users", "3"),
            ("Usage of /", "42%"),
            ("x", "y"),
        ] {
            let line = formatter.format_entry(&StatusEntry::new(label, Severity::Good, value));
            assert_eq!(width(&line), 38, "{line:?}");
            assert!(line.starts_with(label));
            assert!(line.ends_with(value));
        }
    }

    #[test]
    fn test_format_entry_layout() {
        let line = plain().format_entry(&StatusEntry::new("Users", Severity::Good, "3"));
        let filler = "·".repeat(37 - 5 - 1 - 1);
        assert_eq!(line, format!("Users {filler} 3"));
    }

    #[test]
    fn test_format_entry_glyph_substitution() {
        let formatter = plain();
        let good = formatter.format_entry(&StatusEntry::glyph("nginx", Severity::Good));
        let warning = formatter.format_entry(&StatusEntry::glyph("disk", Severity::Warning));
        let bad = formatter.format_entry(&StatusEntry::glyph("redis", Severity::Bad));
        assert!(good.ends_with(" ✓"));
        assert!(warning.ends_with(" ⚠"));
        assert!(bad.ends_with(" ✗"));
    }

    #[test]
    fn test_format_entry_clamps_filler() {
        let label = "l".repeat(40);
        let value = "v".repeat(40);
        let line = plain().format_entry(&StatusEntry::new(label, Severity::Bad, value));
        assert_eq!(
            line,
            format!("{}… · {}…", "l".repeat(25), "v".repeat(25))
        );
    }

    #[test]
    fn test_format_entry_colors_value_only() {
        let line = ColumnFormatter::default()
            .format_entry(&StatusEntry::new("Memory usage", Severity::Bad, "97.2%"));
        assert!(line.starts_with("Memory usage ·"));
        assert!(line.contains('\u{1b}'));
        assert!(line.contains("97.2%"));
    }

    #[test]
    fn test_combine_columns() {
        assert_eq!(combine_columns("a", Some("b")), "a | b");
        assert_eq!(combine_columns("a", None), "a");
    }

    #[test]
    fn test_section_lines_pairs_entries() {
        let mut section = Section::new("Discovery Checks");
        section.extend([
            StatusEntry::glyph("web", Severity::Good),
            StatusEntry::glyph("db", Severity::Warning),
            StatusEntry::glyph("cache", Severity::Bad),
        ]);

        let lines = plain().section_lines(&section);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Discovery Checks");
        assert_eq!(width(&lines[1]), 38 + 3 + 38);
        assert!(lines[1].contains(" | db "));
        assert!(lines[2].starts_with("cache "));
        assert!(!lines[2].contains(" | "));
        assert!(width(&lines[1]) <= DEFAULT_STYLE.max_width);
    }

    #[test]
    fn test_write_section_ends_with_blank_line() {
        let mut section = Section::new("System Info");
        section.push(StatusEntry::new("Users", Severity::Good, "1"));

        let mut out = Vec::new();
        plain().write_section(&mut out, &section).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("System Info\nUsers "));
        assert!(text.ends_with(" 1\n\n"));
    }
}
