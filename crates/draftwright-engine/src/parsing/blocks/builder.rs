use crate::model::{DocumentBuilder, ImageSpec, Node};
use crate::parsing::inline::parse_inline;

use super::{
    classify::LineClass,
    kinds::BlockQuote,
    open::BlockOpen,
};

/// The multi-line block currently being accumulated.
#[derive(Debug, Clone, Default)]
enum LeafState {
    #[default]
    None,
    Fence {
        language: String,
        lines: Vec<String>,
    },
    Quote {
        lines: Vec<String>,
    },
    Bullets {
        items: Vec<String>,
    },
    Numbered {
        start: u32,
        items: Vec<String>,
    },
}

/// Phase 2 of block parsing: a greedy state machine fed one classified line
/// at a time.
///
/// Single-line constructs go straight to the document; fences, quotes and
/// lists stay open in [`LeafState`] until a line that does not continue them.
pub struct BlockBuilder {
    leaf: LeafState,
    doc: DocumentBuilder,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            doc: DocumentBuilder::new(),
        }
    }

    pub fn push(&mut self, c: &LineClass<'_>) {
        if self.in_fence() {
            self.consume_fence_line(c);
            return;
        }

        if self.extend_open_block(c) {
            return;
        }

        // Blank lines close whatever is open and are otherwise skipped.
        self.flush();
        if let Some(open) = c.open {
            self.open_block(open);
        }
    }

    pub fn finish(mut self) -> Vec<Node> {
        // EOF flush; an unterminated fence keeps everything after its opener
        self.flush();
        self.doc.into_nodes()
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    fn consume_fence_line(&mut self, c: &LineClass<'_>) {
        if c.closes_fence {
            self.flush();
        } else if let LeafState::Fence { lines, .. } = &mut self.leaf {
            lines.push(c.raw.to_string());
        }
    }

    fn extend_open_block(&mut self, c: &LineClass<'_>) -> bool {
        match (&mut self.leaf, c.open) {
            (LeafState::Quote { lines }, Some(BlockOpen::Quote { text })) => {
                lines.push(text.to_string());
                true
            }
            (LeafState::Bullets { items }, Some(BlockOpen::Bullet { text }))
            | (LeafState::Numbered { items, .. }, Some(BlockOpen::Numbered { text, .. })) => {
                items.push(text.to_string());
                true
            }
            _ => false,
        }
    }

    fn open_block(&mut self, open: BlockOpen<'_>) {
        match open {
            BlockOpen::ThematicBreak => {
                self.doc.horizontal_rule();
            }
            BlockOpen::Heading { markers, text } => {
                self.doc.heading(text, markers as i64);
            }
            BlockOpen::FencedCode { language } => {
                self.leaf = LeafState::Fence {
                    language: language.to_string(),
                    lines: vec![],
                };
            }
            BlockOpen::Image { alt, src } => {
                let mut spec = ImageSpec::new(src);
                if !alt.is_empty() {
                    spec = spec.alt(alt);
                }
                self.doc.image(spec);
            }
            BlockOpen::Quote { text } => {
                self.leaf = LeafState::Quote {
                    lines: vec![text.to_string()],
                };
            }
            BlockOpen::Bullet { text } => {
                self.leaf = LeafState::Bullets {
                    items: vec![text.to_string()],
                };
            }
            BlockOpen::Numbered { number, text } => {
                self.leaf = LeafState::Numbered {
                    start: number,
                    items: vec![text.to_string()],
                };
            }
            BlockOpen::Paragraph { text } => {
                self.doc.paragraph(parse_inline(text));
            }
        }
    }

    fn flush(&mut self) {
        match std::mem::take(&mut self.leaf) {
            LeafState::None => {}
            LeafState::Fence { language, lines } => {
                self.doc.code_block(lines.join("\n"), language);
            }
            LeafState::Quote { lines } => {
                self.doc.blockquote(BlockQuote::join(&lines));
            }
            LeafState::Bullets { items } => {
                self.doc.bullet_list(items);
            }
            LeafState::Numbered { start, items } => {
                self.doc.ordered_list_from(start, items);
            }
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
