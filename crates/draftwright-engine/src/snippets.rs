//! Ready-made block groups for common additions to a draft.
//!
//! Each function returns top-level blocks ready for
//! [`ContentOperation::Append`](crate::reconcile::ContentOperation::Append).

use crate::model::{DocumentBuilder, Node, Text, bold, code, italic, link};

pub const DEFAULT_TIP_MESSAGE: &str = "Support this content with Bitcoin";
pub const DEFAULT_DONATION_MESSAGE: &str = "Bitcoin donations welcome";

/// A code block, preceded by its file name in code style and followed by an
/// italic caption when given.
pub fn code_snippet(
    source: &str,
    language: &str,
    filename: Option<&str>,
    caption: Option<&str>,
) -> Vec<Node> {
    let mut b = DocumentBuilder::new();
    if let Some(filename) = filename.filter(|f| !f.is_empty()) {
        b.paragraph([code(format!("📄 {filename}"))]);
    }
    b.code_block(source, language);
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        b.paragraph([italic(caption)]);
    }
    b.into_nodes()
}

/// A rule, a `Milestone: …` heading and an optional description.
pub fn milestone(title: &str, description: Option<&str>) -> Vec<Node> {
    let mut b = DocumentBuilder::new();
    b.horizontal_rule().heading(format!("Milestone: {title}"), 3);
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        b.paragraph([description]);
    }
    b.into_nodes()
}

/// A single plain paragraph.
pub fn update(content: &str) -> Vec<Node> {
    let mut b = DocumentBuilder::new();
    b.paragraph([content]);
    b.into_nodes()
}

pub fn lightning_tip(lnurl: &str, message: &str) -> Vec<Node> {
    labelled_value("⚡", message, lnurl)
}

pub fn bitcoin_donation(address: &str, message: &str) -> Vec<Node> {
    labelled_value("₿", message, address)
}

fn labelled_value(symbol: &str, message: &str, value: &str) -> Vec<Node> {
    let mut b = DocumentBuilder::new();
    b.paragraph([bold(format!("{symbol} {message}: ")), code(value)]);
    b.into_nodes()
}

/// A quoted notice asking for `price_sats` with a payment link.
pub fn paywall_notice(payment_url: &str, price_sats: u64) -> Vec<Node> {
    vec![Node::Blockquote(vec![Node::Paragraph(vec![
        Text::plain(format!(
            "🔒 This content requires {} sats. ",
            group_thousands(price_sats)
        ))
        .into(),
        link("Pay with Lightning", payment_url).into(),
        Text::plain(" to unlock.").into(),
    ])])]
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
