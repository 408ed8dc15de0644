pub mod blocks;
pub mod inline;
pub mod span;

#[cfg(test)]
mod tests;

use log::debug;

use crate::model::{Doc, Node};
use blocks::{BlockBuilder, MarkdownLineClassifier};

/// Parses Markdown into a document. Never fails; empty input gives an empty
/// document.
pub fn parse_markdown(input: &str) -> Doc {
    Doc::with_children(parse_markdown_blocks(input))
}

/// Parses Markdown into a list of top-level blocks, ready to append.
pub fn parse_markdown_blocks(input: &str) -> Vec<Node> {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for line in input.split('\n') {
        let lc = classifier.classify(line.strip_suffix('\r').unwrap_or(line));
        builder.push(&lc);
    }

    let blocks = builder.finish();
    log_block_counts(&blocks);
    blocks
}

fn log_block_counts(blocks: &[Node]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let count = |pred: fn(&Node) -> bool| blocks.iter().filter(|n| pred(n)).count();
    debug!(
        "Parsed {} blocks: {} headings, {} paragraphs, {} code blocks, {} lists, {} quotes, {} images",
        blocks.len(),
        count(|n| matches!(n, Node::Heading { .. })),
        count(|n| matches!(n, Node::Paragraph(_))),
        count(|n| matches!(n, Node::CodeBlock { .. })),
        count(|n| matches!(n, Node::BulletList(_) | Node::OrderedList { .. })),
        count(|n| matches!(n, Node::Blockquote(_))),
        count(|n| matches!(n, Node::CaptionedImage { .. })),
    );
}
