use serde_json::{Map, Value};

use crate::model::{Doc, Image, Node};

use super::resolve::DraftId;

/// The editor-side URL an image is served through once it sits in a draft.
pub fn redirect_url(origin: &str, draft_id: &DraftId, src: &str) -> String {
    format!(
        "{}/i/{}?img={}",
        origin.trim_end_matches('/'),
        draft_id,
        urlencoding::encode(src)
    )
}

/// Fills in `internalRedirect` on every image in the tree that has a source
/// and no redirect yet. Existing redirects are left alone, so running this
/// twice is the same as running it once. Returns how many images changed.
pub fn fix_image_redirects(doc: &mut Doc, draft_id: &DraftId, origin: &str) -> usize {
    let mut fixed = 0;
    for node in &mut doc.children {
        fix_node(node, draft_id, origin, &mut fixed);
    }
    fixed
}

fn fix_node(node: &mut Node, draft_id: &DraftId, origin: &str, fixed: &mut usize) {
    match node {
        Node::Image(image) => fix_image(image, draft_id, origin, fixed),
        Node::CaptionedImage { image, trailing } => {
            fix_image(image, draft_id, origin, fixed);
            for c in trailing {
                fix_node(c, draft_id, origin, fixed);
            }
        }
        Node::Paragraph(children)
        | Node::Blockquote(children)
        | Node::Heading { children, .. }
        | Node::CodeBlock { children, .. } => {
            for c in children {
                fix_node(c, draft_id, origin, fixed);
            }
        }
        Node::BulletList(items) | Node::OrderedList { items, .. } => {
            for item in items {
                for c in &mut item.children {
                    fix_node(c, draft_id, origin, fixed);
                }
            }
        }
        Node::Other(raw) => fix_raw(raw, draft_id, origin, fixed),
        Node::HorizontalRule | Node::Embed(_) | Node::Text(_) => {}
    }
}

/// Same rule over an untyped subtree: every `image2` object reached through
/// `content` arrays.
fn fix_raw(value: &mut Value, draft_id: &DraftId, origin: &str, fixed: &mut usize) {
    let Value::Object(obj) = value else {
        return;
    };

    if obj.get("type").and_then(Value::as_str) == Some("image2")
        && let Some(Value::Object(attrs)) = obj.get_mut("attrs")
    {
        fix_raw_image(attrs, draft_id, origin, fixed);
    }

    if let Some(Value::Array(children)) = obj.get_mut("content") {
        for c in children {
            fix_raw(c, draft_id, origin, fixed);
        }
    }
}

fn fix_raw_image(
    attrs: &mut Map<String, Value>,
    draft_id: &DraftId,
    origin: &str,
    fixed: &mut usize,
) {
    let Some(src) = attrs.get("src").and_then(Value::as_str).filter(|s| !s.is_empty()) else {
        return;
    };
    let has_redirect = match attrs.get("internalRedirect") {
        None | Some(Value::Null) => false,
        Some(Value::String(r)) => !r.is_empty(),
        Some(_) => true,
    };
    if has_redirect {
        return;
    }
    let url = redirect_url(origin, draft_id, src);
    attrs.insert("internalRedirect".into(), Value::String(url));
    *fixed += 1;
}

fn fix_image(image: &mut Image, draft_id: &DraftId, origin: &str, fixed: &mut usize) {
    let has_redirect = image.internal_redirect.as_deref().is_some_and(|r| !r.is_empty());
    if image.src.is_empty() || has_redirect {
        return;
    }
    image.internal_redirect = Some(redirect_url(origin, draft_id, &image.src));
    *fixed += 1;
}
