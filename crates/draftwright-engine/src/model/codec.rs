//! Canonical JSON form of the document tree.
//!
//! Encoding is total. Decoding is lenient below the root: a node whose type
//! is unknown, or whose shape the typed model cannot hold without dropping
//! data, decodes as [`Node::Other`] and is re-emitted verbatim. Only a root
//! that is not a JSON object is rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value, json};

use super::mark::{Mark, Marks};
use super::node::{Doc, Embed, HeadingLevel, Image, ListItem, Node, Text, Tweet, YouTube};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected a document object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Short name of a JSON value's type, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub fn encode_doc(doc: &Doc) -> Value {
    json!({
        "type": "doc",
        "content": doc.children.iter().map(encode_node).collect::<Vec<_>>(),
    })
}

pub fn encode_node(node: &Node) -> Value {
    match node {
        Node::Paragraph(children) => element("paragraph", None, children),
        Node::Heading { level, children } => {
            element("heading", Some(json!({ "level": level.get() })), children)
        }
        Node::Blockquote(children) => element("blockquote", None, children),
        Node::CodeBlock { language, children } => {
            element("codeBlock", Some(json!({ "language": language })), children)
        }
        Node::BulletList(items) => list("bulletList", None, items),
        Node::OrderedList { start_order, items } => {
            list("orderedList", Some(json!({ "order": start_order })), items)
        }
        Node::HorizontalRule => json!({ "type": "horizontalRule" }),
        Node::CaptionedImage { image, trailing } => {
            let mut content = vec![encode_image(image)];
            content.extend(trailing.iter().map(encode_node));
            json!({ "type": "captionedImage", "content": content })
        }
        Node::Image(image) => encode_image(image),
        Node::Embed(Embed::YouTube(video)) => json!({
            "type": "youtube2",
            "attrs": {
                "videoId": video.video_id,
                "startTime": video.start_time,
                "endTime": video.end_time,
            },
        }),
        Node::Embed(Embed::Twitter(tweet)) => json!({
            "type": "twitter2",
            "attrs": {
                "url": tweet.url,
                "full_text": tweet.full_text,
                "username": tweet.username,
                "name": tweet.name,
                "date": tweet.date,
                "photos": tweet.photos,
                "quoted_tweet": tweet.quoted_tweet,
                "retweet_count": tweet.retweet_count,
                "like_count": tweet.like_count,
                "expanded_url": tweet.expanded_url,
                "video_url": tweet.video_url,
            },
        }),
        Node::Text(text) => encode_text(text),
        Node::Other(raw) => raw.clone(),
    }
}

fn element(kind: &str, attrs: Option<Value>, children: &[Node]) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::from(kind));
    if let Some(attrs) = attrs {
        obj.insert("attrs".into(), attrs);
    }
    if !children.is_empty() {
        obj.insert(
            "content".into(),
            Value::Array(children.iter().map(encode_node).collect()),
        );
    }
    Value::Object(obj)
}

fn list(kind: &str, attrs: Option<Value>, items: &[ListItem]) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::from(kind));
    if let Some(attrs) = attrs {
        obj.insert("attrs".into(), attrs);
    }
    obj.insert(
        "content".into(),
        Value::Array(
            items
                .iter()
                .map(|item| element("listItem", None, &item.children))
                .collect(),
        ),
    );
    Value::Object(obj)
}

fn encode_image(image: &Image) -> Value {
    let mut attrs = image.extra_attrs.clone();
    attrs.insert("src".into(), Value::from(image.src.as_str()));
    attrs.insert("alt".into(), opt(image.alt.as_deref()));
    attrs.insert("width".into(), image.width.map_or(Value::Null, Value::from));
    attrs.insert("height".into(), image.height.map_or(Value::Null, Value::from));
    attrs.insert("bytes".into(), image.byte_size.map_or(Value::Null, Value::from));
    attrs.insert("type".into(), opt(image.content_type.as_deref()));
    attrs.insert(
        "internalRedirect".into(),
        opt(image.internal_redirect.as_deref()),
    );
    json!({ "type": "image2", "attrs": attrs })
}

fn encode_text(text: &Text) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::from("text"));
    obj.insert("text".into(), Value::from(text.content.as_str()));
    if !text.marks.is_empty() {
        obj.insert(
            "marks".into(),
            Value::Array(text.marks.iter().map(encode_mark).collect()),
        );
    }
    Value::Object(obj)
}

fn encode_mark(mark: &Mark) -> Value {
    match mark {
        Mark::Strong => json!({ "type": "strong" }),
        Mark::Em => json!({ "type": "em" }),
        Mark::Code => json!({ "type": "code" }),
        Mark::Link { href, title } => json!({
            "type": "link",
            "attrs": { "href": href, "title": title },
        }),
        Mark::Other(raw) => raw.clone(),
    }
}

fn opt(value: Option<&str>) -> Value {
    value.map_or(Value::Null, Value::from)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes a document root.
///
/// An object without an array `content` is an empty document; each child is
/// decoded leniently. Non-block children are kept as passthrough nodes.
pub fn decode_doc(value: &Value) -> Result<Doc, DecodeError> {
    let Value::Object(obj) = value else {
        return Err(DecodeError::NotAnObject {
            found: json_kind(value),
        });
    };

    let children = match obj.get("content") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|raw| match decode_node(raw) {
                node if node.is_block() => node,
                _ => Node::Other(raw.clone()),
            })
            .collect(),
        _ => vec![],
    };

    Ok(Doc { children })
}

/// Decodes one node, falling back to [`Node::Other`] on any mismatch.
pub fn decode_node(value: &Value) -> Node {
    try_decode_node(value).unwrap_or_else(|| Node::Other(value.clone()))
}

fn try_decode_node(value: &Value) -> Option<Node> {
    let obj = value.as_object()?;
    let kind = obj.get("type")?.as_str()?;

    match kind {
        "paragraph" => {
            only_keys(obj, &["type", "content"])?;
            Some(Node::Paragraph(children(obj)?))
        }
        "blockquote" => {
            only_keys(obj, &["type", "content"])?;
            Some(Node::Blockquote(children(obj)?))
        }
        "heading" => {
            only_keys(obj, &["type", "attrs", "content"])?;
            let attrs = attrs(obj, &["level"])?;
            let level = HeadingLevel::exact(attrs.get("level")?.as_i64()?)?;
            Some(Node::Heading {
                level,
                children: children(obj)?,
            })
        }
        "codeBlock" => {
            only_keys(obj, &["type", "attrs", "content"])?;
            let attrs = attrs(obj, &["language"])?;
            let language = match attrs.get("language") {
                None => String::new(),
                Some(v) => v.as_str()?.to_string(),
            };
            Some(Node::CodeBlock {
                language,
                children: children(obj)?,
            })
        }
        "bulletList" => {
            only_keys(obj, &["type", "content"])?;
            Some(Node::BulletList(list_items(obj)?))
        }
        "orderedList" => {
            only_keys(obj, &["type", "attrs", "content"])?;
            let attrs = attrs(obj, &["order"])?;
            let start_order = match attrs.get("order") {
                None => 1,
                Some(v) => u32::try_from(v.as_u64()?).ok()?,
            };
            Some(Node::OrderedList {
                start_order,
                items: list_items(obj)?,
            })
        }
        "horizontalRule" => {
            only_keys(obj, &["type"])?;
            Some(Node::HorizontalRule)
        }
        "captionedImage" => {
            only_keys(obj, &["type", "content"])?;
            let content = obj.get("content")?.as_array()?;
            let (first, rest) = content.split_first()?;
            Some(Node::CaptionedImage {
                image: decode_image(first)?,
                trailing: rest.iter().map(decode_node).collect(),
            })
        }
        "image2" => decode_image(value).map(Node::Image),
        "youtube2" => {
            only_keys(obj, &["type", "attrs"])?;
            let video: YouTube = serde_json::from_value(obj.get("attrs")?.clone()).ok()?;
            Some(Node::Embed(Embed::YouTube(video)))
        }
        "twitter2" => {
            only_keys(obj, &["type", "attrs"])?;
            let tweet: Tweet = serde_json::from_value(obj.get("attrs")?.clone()).ok()?;
            Some(Node::Embed(Embed::Twitter(tweet)))
        }
        "text" => decode_text(obj).map(Node::Text),
        _ => None,
    }
}

fn only_keys(obj: &Map<String, Value>, allowed: &[&str]) -> Option<()> {
    obj.keys()
        .all(|k| allowed.contains(&k.as_str()))
        .then_some(())
}

/// Attribute map restricted to `allowed` keys; a missing or null `attrs` is
/// an empty map.
fn attrs(obj: &Map<String, Value>, allowed: &[&str]) -> Option<Map<String, Value>> {
    match obj.get("attrs") {
        None | Some(Value::Null) => Some(Map::new()),
        Some(Value::Object(attrs)) => {
            only_keys(attrs, allowed)?;
            Some(attrs.clone())
        }
        Some(_) => None,
    }
}

/// An explicit empty `content` array is not re-emitted by the encoder, so it
/// only decodes through passthrough.
fn children(obj: &Map<String, Value>) -> Option<Vec<Node>> {
    match obj.get("content") {
        None => Some(vec![]),
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(Value::Array(items)) => Some(items.iter().map(decode_node).collect()),
        Some(_) => None,
    }
}

fn list_items(obj: &Map<String, Value>) -> Option<Vec<ListItem>> {
    let items = match obj.get("content") {
        None => return Some(vec![]),
        Some(v) => v.as_array()?,
    };
    items
        .iter()
        .map(|raw| {
            let item = raw.as_object()?;
            if item.get("type")?.as_str()? != "listItem" {
                return None;
            }
            only_keys(item, &["type", "content"])?;
            Some(ListItem {
                children: children(item)?,
            })
        })
        .collect()
}

fn decode_image(value: &Value) -> Option<Image> {
    let obj = value.as_object()?;
    if obj.get("type")?.as_str()? != "image2" {
        return None;
    }
    only_keys(obj, &["type", "attrs"])?;
    let mut attrs = obj.get("attrs")?.as_object()?.clone();

    let src = attrs.remove("src")?.as_str()?.to_string();
    let alt = take_opt_string(&mut attrs, "alt")?;
    let width = take_opt_u64(&mut attrs, "width")?
        .map(u32::try_from)
        .transpose()
        .ok()?;
    let height = take_opt_u64(&mut attrs, "height")?
        .map(u32::try_from)
        .transpose()
        .ok()?;
    let byte_size = take_opt_u64(&mut attrs, "bytes")?;
    let content_type = take_opt_string(&mut attrs, "type")?;
    let internal_redirect = take_opt_string(&mut attrs, "internalRedirect")?;

    Some(Image {
        src,
        alt,
        width,
        height,
        byte_size,
        content_type,
        internal_redirect,
        extra_attrs: attrs,
    })
}

/// `Some(None)` for a missing or null attribute, `None` for a type mismatch.
fn take_opt_string(attrs: &mut Map<String, Value>, key: &str) -> Option<Option<String>> {
    match attrs.remove(key) {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s)),
        Some(_) => None,
    }
}

fn take_opt_u64(attrs: &mut Map<String, Value>, key: &str) -> Option<Option<u64>> {
    match attrs.remove(key) {
        None | Some(Value::Null) => Some(None),
        Some(v) => v.as_u64().map(Some),
    }
}

fn decode_text(obj: &Map<String, Value>) -> Option<Text> {
    only_keys(obj, &["type", "text", "marks"])?;
    let content = obj.get("text")?.as_str()?.to_string();
    let mut marks = Marks::new();
    match obj.get("marks") {
        None | Some(Value::Null) => {}
        Some(Value::Array(raw_marks)) => {
            for raw in raw_marks {
                // A repeated kind would collapse and lose data; keep the node raw instead.
                if !marks.insert(decode_mark(raw)) {
                    return None;
                }
            }
        }
        Some(_) => return None,
    }
    Some(Text { content, marks })
}

fn decode_mark(value: &Value) -> Mark {
    try_decode_mark(value).unwrap_or_else(|| Mark::Other(value.clone()))
}

fn try_decode_mark(value: &Value) -> Option<Mark> {
    let obj = value.as_object()?;
    match obj.get("type")?.as_str()? {
        "strong" => only_keys(obj, &["type"]).map(|_| Mark::Strong),
        "em" => only_keys(obj, &["type"]).map(|_| Mark::Em),
        "code" => only_keys(obj, &["type"]).map(|_| Mark::Code),
        "link" => {
            only_keys(obj, &["type", "attrs"])?;
            let mut attrs = attrs(obj, &["href", "title"])?;
            let href = attrs.remove("href")?.as_str()?.to_string();
            let title = take_opt_string(&mut attrs, "title")?;
            Some(Mark::Link { href, title })
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

impl Serialize for Doc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_doc(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_doc(&value).map_err(de::Error::custom)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_node(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(decode_node(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_paragraph_omits_content() {
        assert_eq!(
            encode_node(&Node::Paragraph(vec![])),
            json!({ "type": "paragraph" })
        );
    }

    #[test]
    fn link_mark_carries_null_title() {
        let text = Text::marked("site", [Mark::link("https://x.test")]);
        assert_eq!(
            encode_node(&Node::Text(text)),
            json!({
                "type": "text",
                "text": "site",
                "marks": [{ "type": "link", "attrs": { "href": "https://x.test", "title": null } }],
            })
        );
    }

    #[test]
    fn ordered_list_carries_order_attr() {
        let node = Node::OrderedList {
            start_order: 3,
            items: vec![ListItem::plain("x")],
        };
        let value = encode_node(&node);
        assert_eq!(value["type"], "orderedList");
        assert_eq!(value["attrs"]["order"], 3);
        assert_eq!(value["content"][0]["type"], "listItem");
        assert_eq!(value["content"][0]["content"][0]["content"][0]["text"], "x");
    }

    #[test]
    fn builder_image_emits_editor_defaults() {
        let value = encode_node(&Node::Image(Image::new("https://x.test/a.png")));
        let attrs = &value["attrs"];
        assert_eq!(value["type"], "image2");
        assert_eq!(attrs["src"], "https://x.test/a.png");
        assert_eq!(attrs["internalRedirect"], Value::Null);
        assert_eq!(attrs["belowTheFold"], false);
        assert_eq!(attrs["srcNoWatermark"], Value::Null);
    }

    #[test]
    fn known_nodes_decode_to_typed_variants() {
        let raw = json!({
            "type": "heading",
            "attrs": { "level": 3 },
            "content": [{ "type": "text", "text": "Hi", "marks": [{ "type": "strong" }] }],
        });
        let node = decode_node(&raw);
        assert_eq!(
            node,
            Node::Heading {
                level: HeadingLevel::clamped(3),
                children: vec![Node::Text(Text::marked("Hi", [Mark::Strong]))],
            }
        );
        assert_eq!(encode_node(&node), raw);
    }

    #[test]
    fn unknown_node_type_passes_through() {
        let raw = json!({ "type": "paywall", "attrs": { "x": 1 } });
        assert_eq!(decode_node(&raw), Node::Other(raw.clone()));
        assert_eq!(encode_node(&decode_node(&raw)), raw);
    }

    #[test]
    fn heading_outside_schema_range_passes_through() {
        let raw = json!({ "type": "heading", "attrs": { "level": 1 }, "content": [] });
        assert!(matches!(decode_node(&raw), Node::Other(_)));
    }

    #[test]
    fn paragraph_with_unmodeled_attrs_passes_through() {
        let raw = json!({ "type": "paragraph", "attrs": { "textAlign": "center" } });
        assert!(matches!(decode_node(&raw), Node::Other(_)));
    }

    #[test]
    fn text_with_duplicate_marks_passes_through() {
        let raw = json!({
            "type": "text",
            "text": "x",
            "marks": [{ "type": "em" }, { "type": "em" }],
        });
        assert!(matches!(decode_node(&raw), Node::Other(_)));
    }

    #[test]
    fn unknown_mark_is_kept_on_typed_text() {
        let raw = json!({
            "type": "text",
            "text": "x",
            "marks": [{ "type": "underline" }, { "type": "em" }],
        });
        let Node::Text(text) = decode_node(&raw) else {
            panic!("expected text");
        };
        assert!(text.marks.has_em());
        assert_eq!(text.marks.len(), 2);
        assert_eq!(encode_node(&Node::Text(text)), raw);
    }

    #[test]
    fn remote_image_keeps_unmodeled_attrs() {
        let raw = json!({
            "type": "captionedImage",
            "content": [
                { "type": "image2", "attrs": { "src": "a.png", "resizeWidth": 640, "custom": "kept" } },
                { "type": "imageCaption", "content": [{ "type": "text", "text": "cap" }] },
            ],
        });
        let Node::CaptionedImage { image, trailing } = decode_node(&raw) else {
            panic!("expected captioned image");
        };
        assert_eq!(image.src, "a.png");
        assert_eq!(image.extra_attrs().get("custom"), Some(&json!("kept")));
        assert_eq!(trailing.len(), 1);
        assert!(matches!(trailing[0], Node::Other(_)));

        let encoded = encode_node(&Node::CaptionedImage { image, trailing });
        assert_eq!(encoded["content"][0]["attrs"]["resizeWidth"], 640);
        assert_eq!(encoded["content"][1], raw["content"][1]);
    }

    #[test]
    fn youtube_embed_decodes_and_reencodes() {
        let raw = json!({
            "type": "youtube2",
            "attrs": { "videoId": "abc", "startTime": null, "endTime": 30 },
        });
        let node = decode_node(&raw);
        assert_eq!(
            node,
            Node::Embed(Embed::YouTube(YouTube {
                video_id: "abc".into(),
                start_time: None,
                end_time: Some(30),
            }))
        );
        assert_eq!(encode_node(&node), raw);
    }

    #[test]
    fn explicit_empty_content_passes_through() {
        let raw = json!({ "type": "paragraph", "content": [] });
        assert_eq!(encode_node(&decode_node(&raw)), raw);
    }

    #[test]
    fn tweet_embed_attrs_decode_back_to_the_same_tweet() {
        let mut tweet = Tweet::new("https://x.test/s/1", "hello", "me");
        tweet.like_count = 3;
        tweet.video_url = Some("https://x.test/v.mp4".into());
        let node = Node::Embed(Embed::Twitter(tweet));

        let encoded = encode_node(&node);
        assert_eq!(encoded["attrs"]["like_count"], 3);
        assert_eq!(encoded["attrs"]["expanded_url"], json!({}));
        assert_eq!(decode_node(&encoded), node);
    }

    #[test]
    fn doc_root_must_be_an_object() {
        assert_eq!(
            decode_doc(&json!([1, 2])),
            Err(DecodeError::NotAnObject { found: "an array" })
        );
    }

    #[test]
    fn doc_without_content_array_is_empty() {
        let doc = decode_doc(&json!({ "content": "not-a-list" })).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn text_directly_under_root_is_kept_raw() {
        let raw = json!({ "type": "doc", "content": [{ "type": "text", "text": "loose" }] });
        let doc = decode_doc(&raw).unwrap();
        assert!(matches!(doc.children[0], Node::Other(_)));
        assert_eq!(encode_doc(&doc), raw);
    }

    #[test]
    fn serde_round_trip_through_strings() {
        let doc = Doc::with_children(vec![
            Node::heading(2, vec![Text::plain("T").into()]),
            Node::HorizontalRule,
        ]);
        let text = serde_json::to_string(&doc).unwrap();
        let back: Doc = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }
}
