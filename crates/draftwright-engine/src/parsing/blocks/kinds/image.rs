use std::sync::OnceLock;

use regex::Regex;

/// A line holding exactly one image, `![alt](src)`.
pub struct ImageLine;

impl ImageLine {
    /// Returns `(alt, src)`. The alt may be empty; the source may not.
    pub fn parse(trimmed: &str) -> Option<(&str, &str)> {
        static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = IMAGE_REGEX.get_or_init(|| {
            Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").expect("Invalid image regex")
        });
        let caps = re.captures(trimmed)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}
