use std::sync::OnceLock;

use regex::Regex;

/// Bullet list item markers.
pub struct BulletList;

impl BulletList {
    pub const MARKERS: [&'static str; 2] = ["- ", "* "];

    /// Strips the bullet marker, returning the item text.
    pub fn strip(trimmed: &str) -> Option<&str> {
        Self::MARKERS.iter().find_map(|m| trimmed.strip_prefix(m))
    }
}

/// Numbered list items, `1. text`.
pub struct OrderedList;

impl OrderedList {
    /// Start number used when the written number does not fit.
    pub const DEFAULT_START: u32 = 1;

    /// Returns `(number, item text)` for a numbered line.
    pub fn parse(trimmed: &str) -> Option<(u32, &str)> {
        static ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ITEM_REGEX
            .get_or_init(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("Invalid list item regex"));
        let caps = re.captures(trimmed)?;
        let number = caps
            .get(1)?
            .as_str()
            .parse()
            .unwrap_or(Self::DEFAULT_START);
        Some((number, caps.get(2)?.as_str()))
    }
}
