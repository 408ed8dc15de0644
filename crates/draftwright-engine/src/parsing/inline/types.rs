use crate::parsing::span::Span;

use super::kinds::Emphasis;

/// A scanned inline construct with byte spans into its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Text outside any construct.
    Text(Span),
    Emphasis {
        kind: Emphasis,
        /// Full span including delimiters.
        full: Span,
        inner: Span,
    },
    Link {
        full: Span,
        text: Span,
        href: Span,
    },
}

impl InlineNode {
    pub fn full(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::Emphasis { full, .. } | InlineNode::Link { full, .. } => *full,
        }
    }
}
