use super::kinds::{AtxHeading, BlockQuote, BulletList, CodeFence, ImageLine, OrderedList, ThematicBreak};

/// What a non-blank line opens, decided from the trimmed line alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    ThematicBreak,
    Heading { markers: usize, text: &'a str },
    FencedCode { language: &'a str },
    Image { alt: &'a str, src: &'a str },
    Quote { text: &'a str },
    Bullet { text: &'a str },
    Numbered { number: u32, text: &'a str },
    Paragraph { text: &'a str },
}

/// Tries each opener in precedence order; anything unmatched is a paragraph.
pub fn try_open(trimmed: &str) -> BlockOpen<'_> {
    if ThematicBreak::matches(trimmed) {
        return BlockOpen::ThematicBreak;
    }
    if let Some((markers, text)) = AtxHeading::parse(trimmed) {
        return BlockOpen::Heading { markers, text };
    }
    if let Some(language) = CodeFence::open(trimmed) {
        return BlockOpen::FencedCode { language };
    }
    if let Some((alt, src)) = ImageLine::parse(trimmed) {
        return BlockOpen::Image { alt, src };
    }
    if let Some(text) = BlockQuote::strip(trimmed) {
        return BlockOpen::Quote { text };
    }
    if let Some(text) = BulletList::strip(trimmed) {
        return BlockOpen::Bullet { text };
    }
    if let Some((number, text)) = OrderedList::parse(trimmed) {
        return BlockOpen::Numbered { number, text };
    }
    BlockOpen::Paragraph { text: trimmed }
}
