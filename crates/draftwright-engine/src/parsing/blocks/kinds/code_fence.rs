use std::sync::OnceLock;

use regex::Regex;

/// Fenced code block with owned delimiter.
///
/// Only backtick fences open a block, and the opener may carry a single word
/// naming the language. Everything up to a line that is exactly the fence is
/// raw content.
pub struct CodeFence;

impl CodeFence {
    pub const FENCE: &'static str = "```";

    /// Returns the language word if the trimmed line opens a fence.
    pub fn open(trimmed: &str) -> Option<&str> {
        static OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = OPEN_REGEX.get_or_init(|| Regex::new(r"^```(\w*)$").expect("Invalid fence regex"));
        re.captures(trimmed)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    pub fn closes(trimmed: &str) -> bool {
        trimmed == Self::FENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("```", Some(""))]
    #[case("```py", Some("py"))]
    #[case("```rust_2024", Some("rust_2024"))]
    #[case("```c++", None)]
    #[case("``` py", None)]
    #[case("~~~", None)]
    #[case("hello", None)]
    fn detect_opener(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(CodeFence::open(line), expected);
    }

    #[test]
    fn only_bare_fence_closes() {
        assert!(CodeFence::closes("```"));
        assert!(!CodeFence::closes("```py"));
        assert!(!CodeFence::closes("``"));
    }
}
