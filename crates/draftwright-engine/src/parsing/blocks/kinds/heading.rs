use std::sync::OnceLock;

use regex::Regex;

/// ATX heading, one to four `#` followed by whitespace and text.
///
/// Five or more `#` is not a heading. The level is clamped later by the
/// model, so `#` yields a level-2 heading.
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: char = '#';
    pub const MAX_MARKERS: usize = 4;

    /// Returns `(marker count, text)` for a heading line.
    pub fn parse(trimmed: &str) -> Option<(usize, &str)> {
        static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = HEADING_REGEX
            .get_or_init(|| Regex::new(r"^(#{1,4})\s+(.+)$").expect("Invalid heading regex"));
        let caps = re.captures(trimmed)?;
        Some((caps.get(1)?.as_str().len(), caps.get(2)?.as_str()))
    }
}
