use super::{
    kinds::CodeFence,
    open::{BlockOpen, try_open},
};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// The line as written, without its `\n`. Fenced code keeps this form.
    pub raw: &'a str,
    /// Whether the line is blank after trimming.
    pub is_blank: bool,
    /// Whether the trimmed line is exactly a closing fence.
    pub closes_fence: bool,
    /// What the line would open outside a fence. `None` for blank lines.
    pub open: Option<BlockOpen<'a>>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`].
    pub fn classify<'a>(&self, raw: &'a str) -> LineClass<'a> {
        let trimmed = raw.trim();
        let is_blank = trimmed.is_empty();

        LineClass {
            raw,
            is_blank,
            closes_fence: CodeFence::closes(trimmed),
            open: (!is_blank).then(|| try_open(trimmed)),
        }
    }
}
