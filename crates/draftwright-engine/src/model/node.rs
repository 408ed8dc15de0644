use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::mark::{Mark, Marks};

/// Root of a document tree.
///
/// Children are block-level nodes only; a text node never sits directly under
/// the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    pub children: Vec<Node>,
}

impl Doc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of top-level headings, used as the section count of a draft.
    pub fn section_count(&self) -> usize {
        self.children
            .iter()
            .filter(|n| matches!(n, Node::Heading { .. }))
            .count()
    }

    /// All images reachable from the root, depth first.
    pub fn images(&self) -> Vec<&Image> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_images(&mut out);
        }
        out
    }
}

/// Heading level, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 4;

    /// Clamps any requested level into the supported range.
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Exact level, `None` when outside the supported range.
    pub fn exact(level: i64) -> Option<Self> {
        (Self::MIN as i64..=Self::MAX as i64)
            .contains(&level)
            .then_some(Self(level as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// A node of the document tree below the root.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Paragraph(Vec<Node>),
    Heading {
        level: HeadingLevel,
        children: Vec<Node>,
    },
    Blockquote(Vec<Node>),
    CodeBlock {
        language: String,
        children: Vec<Node>,
    },
    BulletList(Vec<ListItem>),
    OrderedList {
        start_order: u32,
        items: Vec<ListItem>,
    },
    HorizontalRule,
    /// Wraps one image. Nodes decoded after the image (e.g. a remote
    /// `imageCaption`) are kept in `trailing`.
    CaptionedImage {
        image: Image,
        trailing: Vec<Node>,
    },
    Image(Image),
    Embed(Embed),
    Text(Text),
    /// A node decoded from a remote tree whose type or shape the model cannot
    /// represent without loss. Re-emitted verbatim.
    Other(Value),
}

impl Node {
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(children)
    }

    pub fn heading(level: i64, children: Vec<Node>) -> Self {
        Node::Heading {
            level: HeadingLevel::clamped(level),
            children,
        }
    }

    /// Whether the node may sit directly under the root.
    pub fn is_block(&self) -> bool {
        !matches!(self, Node::Text(_) | Node::Image(_))
    }

    /// Wraps inline nodes so the result may sit directly under the root:
    /// text in a paragraph, a bare image in a captioned image.
    pub fn into_block(self) -> Node {
        match self {
            Node::Text(t) => Node::Paragraph(vec![Node::Text(t)]),
            Node::Image(image) => Node::CaptionedImage {
                image,
                trailing: vec![],
            },
            block => block,
        }
    }

    /// Concatenated text content of the node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&t.content),
            Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::Heading { children, .. }
            | Node::CodeBlock { children, .. } => {
                for c in children {
                    c.push_text(out);
                }
            }
            Node::BulletList(items) | Node::OrderedList { items, .. } => {
                for item in items {
                    for c in &item.children {
                        c.push_text(out);
                    }
                }
            }
            Node::CaptionedImage { trailing, .. } => {
                for c in trailing {
                    c.push_text(out);
                }
            }
            Node::HorizontalRule | Node::Image(_) | Node::Embed(_) | Node::Other(_) => {}
        }
    }

    fn collect_images<'a>(&'a self, out: &mut Vec<&'a Image>) {
        match self {
            Node::Image(image) => out.push(image),
            Node::CaptionedImage { image, trailing } => {
                out.push(image);
                for c in trailing {
                    c.collect_images(out);
                }
            }
            Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::Heading { children, .. }
            | Node::CodeBlock { children, .. } => {
                for c in children {
                    c.collect_images(out);
                }
            }
            Node::BulletList(items) | Node::OrderedList { items, .. } => {
                for item in items {
                    for c in &item.children {
                        c.collect_images(out);
                    }
                }
            }
            Node::HorizontalRule | Node::Embed(_) | Node::Text(_) | Node::Other(_) => {}
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// One entry of a bullet or ordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub children: Vec<Node>,
}

impl ListItem {
    /// A list item holding a single plain-text paragraph.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            children: vec![Node::Paragraph(vec![Node::Text(Text::plain(content))])],
        }
    }
}

/// A text leaf with its marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub content: String,
    pub marks: Marks,
}

impl Text {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            marks: Marks::new(),
        }
    }

    pub fn marked(content: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        Self {
            content: content.into(),
            marks: marks.into_iter().collect(),
        }
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Text::plain(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Text::plain(content)
    }
}

/// An image leaf.
///
/// `internal_redirect` is derived by the reconciler and has no public setter.
/// Attributes the model does not name are kept in `extra_attrs` and
/// re-emitted on serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub byte_size: Option<u64>,
    pub content_type: Option<String>,
    pub(crate) internal_redirect: Option<String>,
    pub(crate) extra_attrs: Map<String, Value>,
}

impl Image {
    /// A fresh image carrying the editor's default attribute bag.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
            width: None,
            height: None,
            byte_size: None,
            content_type: None,
            internal_redirect: None,
            extra_attrs: editor_default_attrs(),
        }
    }

    pub fn internal_redirect(&self) -> Option<&str> {
        self.internal_redirect.as_deref()
    }

    pub fn extra_attrs(&self) -> &Map<String, Value> {
        &self.extra_attrs
    }
}

fn editor_default_attrs() -> Map<String, Value> {
    let mut attrs = Map::new();
    for key in [
        "srcNoWatermark",
        "fullscreen",
        "imageSize",
        "resizeWidth",
        "title",
        "href",
        "align",
    ] {
        attrs.insert(key.to_string(), Value::Null);
    }
    for key in ["belowTheFold", "topImage", "isProcessing", "offset"] {
        attrs.insert(key.to_string(), Value::Bool(false));
    }
    attrs
}

/// Embedded third-party content with a fixed attribute bag per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Embed {
    YouTube(YouTube),
    Twitter(Tweet),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct YouTube {
    pub video_id: String,
    pub start_time: Option<u32>,
    pub end_time: Option<u32>,
}

impl YouTube {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            start_time: None,
            end_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tweet {
    pub url: String,
    pub full_text: String,
    pub username: String,
    pub name: String,
    pub date: String,
    pub photos: Vec<Value>,
    pub quoted_tweet: Value,
    pub retweet_count: u64,
    pub like_count: u64,
    pub expanded_url: Value,
    pub video_url: Option<String>,
}

impl Tweet {
    pub fn new(
        url: impl Into<String>,
        full_text: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            full_text: full_text.into(),
            username: username.into(),
            name: String::new(),
            date: String::new(),
            photos: vec![],
            quoted_tweet: Value::Object(Map::new()),
            retweet_count: 0,
            like_count: 0,
            expanded_url: Value::Object(Map::new()),
            video_url: None,
        }
    }
}
