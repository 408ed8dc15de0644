use crate::model::{Text, bold, italic, link};
use crate::parsing::span::Span;

use super::{
    cursor::Cursor,
    kinds::{Emphasis, Link},
    types::InlineNode,
};

/// Parses one line of paragraph text into text nodes.
///
/// Unmatched delimiters stay literal. Constructs do not nest: the inside of
/// a match is taken as plain text.
pub fn parse_inline(s: &str) -> Vec<Text> {
    scan_inline(s)
        .into_iter()
        .map(|node| match node {
            InlineNode::Text(sp) => Text::plain(sp.slice(s)),
            InlineNode::Emphasis {
                kind: Emphasis::Strong,
                inner,
                ..
            } => bold(inner.slice(s)),
            InlineNode::Emphasis { inner, .. } => italic(inner.slice(s)),
            InlineNode::Link { text, href, .. } => link(text.slice(s), href.slice(s)),
        })
        .collect()
}

/// Scans `s` left to right into non-overlapping [`InlineNode`]s.
///
/// At each position the constructs are tried in a fixed order (strong, star
/// italic, underscore italic, link) and the first that matches wins. Text
/// between constructs is emitted as `InlineNode::Text`.
pub fn scan_inline(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        let found = Emphasis::PRECEDENCE
            .iter()
            .find_map(|kind| try_parse_emphasis(&mut cur, *kind))
            .or_else(|| try_parse_link(&mut cur));

        match found {
            Some(node) => {
                let full = node.full();
                flush_text(&mut out, text_start, full.start);
                text_start = full.end;
                out.push(node);
            }
            None => {
                cur.bump();
            }
        }
    }

    flush_text(&mut out, text_start, s.len());
    out
}

/// Attempts a delimited emphasis run at the current position.
///
/// On failure the cursor is left where it was.
fn try_parse_emphasis(cur: &mut Cursor<'_>, kind: Emphasis) -> Option<InlineNode> {
    let delim = kind.delimiter();
    if !cur.starts_with(delim) {
        return None;
    }

    let start = cur.pos();
    let inner_start = start + delim.len();
    // content is at least one byte, so the closer search starts one past it
    let inner_end = cur.find_from(delim, inner_start + 1)?;
    let end = inner_end + delim.len();
    cur.bump_n(end - start);

    Some(InlineNode::Emphasis {
        kind,
        full: Span { start, end },
        inner: Span {
            start: inner_start,
            end: inner_end,
        },
    })
}

/// Attempts an inline link at the current position.
///
/// On failure, cursor position is restored.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Link::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // [
    let text_start = cur.pos();

    while !cur.eof() && !cur.starts_with(&Link::MIDDLE[..1]) {
        cur.bump();
    }
    let text_end = cur.pos();

    if text_end == text_start || !cur.starts_with(Link::MIDDLE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(Link::MIDDLE.len());
    let href_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(Link::CLOSE) {
        cur.bump();
    }
    let href_end = cur.pos();

    if href_end == href_start || cur.peek() != Some(Link::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // )
    let end = cur.pos();

    Some(InlineNode::Link {
        full: Span { start, end },
        text: Span {
            start: text_start,
            end: text_end,
        },
        href: Span {
            start: href_start,
            end: href_end,
        },
    })
}
