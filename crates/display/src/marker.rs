//! Engine-owned lore lines.
//!
//! Every line the engine writes starts with [`MARKER_PREFIX`]. The prefix is
//! an invalid colour code, so the host renders nothing for it, and it lets
//! the engine find and remove its own lines without touching user lore.

use std::fmt;

/// Reserved invisible prefix of engine-owned lines.
pub const MARKER_PREFIX: &str = "§w";

/// Whether a lore line was written by the engine.
pub fn is_marker(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX)
}

/// Remove every engine-owned line, keeping user lines in order.
/// Returns how many lines were removed.
pub fn strip_markers(lore: &mut Vec<String>) -> usize {
    let before = lore.len();
    lore.retain(|line| !is_marker(line));
    before - lore.len()
}

/// A line of lore owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerLine(String);

impl MarkerLine {
    /// Prefix `body` as engine-owned.
    pub fn new(body: impl AsRef<str>) -> Self {
        Self(format!("{MARKER_PREFIX}{}", body.as_ref()))
    }

    /// Prefix and colour `text`.
    pub fn colored(color: &str, text: &str) -> Self {
        Self(format!("{MARKER_PREFIX}{color}{text}"))
    }

    /// Join several lines into one, e.g. `"§w§7A, §w§7B"`.
    ///
    /// The result keeps the prefix of the first line. Joining nothing gives
    /// a bare prefix.
    pub fn join(lines: &[MarkerLine], separator: &str) -> Self {
        if lines.is_empty() {
            return Self::new("");
        }
        let joined = lines
            .iter()
            .map(MarkerLine::as_str)
            .collect::<Vec<_>>()
            .join(separator);
        Self(joined)
    }

    /// Full text, prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the prefix.
    pub fn body(&self) -> &str {
        &self.0[MARKER_PREFIX.len()..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MarkerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MarkerLine> for String {
    fn from(line: MarkerLine) -> Self {
        line.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lines_are_markers() {
        let line = MarkerLine::colored("§7", "Sharpness V");
        assert_eq!(line.as_str(), "§w§7Sharpness V");
        assert_eq!(line.body(), "§7Sharpness V");
        assert!(is_marker(line.as_str()));
    }

    #[test]
    fn user_lines_are_not_markers() {
        assert!(!is_marker("Forged by Steve"));
        assert!(!is_marker("§7Grey but user-written"));
        assert!(!is_marker(""));
    }

    #[test]
    fn strip_keeps_user_lines_in_order() {
        let mut lore = vec![
            "§w§7Sharpness V".to_string(),
            "first".to_string(),
            "§w§cCurse of Vanishing".to_string(),
            "second".to_string(),
        ];
        assert_eq!(strip_markers(&mut lore), 2);
        assert_eq!(lore, vec!["first", "second"]);
    }

    #[test]
    fn join_uses_separator_without_trailing() {
        let lines = [MarkerLine::colored("§7", "A"), MarkerLine::colored("§7", "B")];
        let joined = MarkerLine::join(&lines, ", ");
        assert_eq!(joined.as_str(), "§w§7A, §w§7B");
        assert!(is_marker(joined.as_str()));
    }
}
