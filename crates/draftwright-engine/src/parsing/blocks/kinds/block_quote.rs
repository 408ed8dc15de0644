/// Blockquote block type with owned delimiter constant.
///
/// Consecutive quoted lines join into a single paragraph. A bare `>` with
/// nothing after it is not a quote line.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: &'static str = "> ";

    /// Strips the quote prefix, returning the quoted text.
    pub fn strip(trimmed: &str) -> Option<&str> {
        trimmed.strip_prefix(Self::PREFIX)
    }

    /// Joins the quoted lines of one block.
    pub fn join(lines: &[String]) -> String {
        lines.join(" ")
    }
}
