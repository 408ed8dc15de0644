use super::codec::encode_doc;
use super::mark::Mark;
use super::node::{Doc, Embed, Image, ListItem, Node, Text, Tweet, YouTube};

/// A text node with the given marks.
pub fn text(content: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Text {
    Text::marked(content, marks)
}

pub fn bold(content: impl Into<String>) -> Text {
    Text::marked(content, [Mark::Strong])
}

pub fn italic(content: impl Into<String>) -> Text {
    Text::marked(content, [Mark::Em])
}

pub fn code(content: impl Into<String>) -> Text {
    Text::marked(content, [Mark::Code])
}

/// A linked text node. An empty `href` is kept as-is.
pub fn link(content: impl Into<String>, href: impl Into<String>) -> Text {
    Text::marked(content, [Mark::link(href)])
}

/// Everything needed to place one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSpec {
    pub src: String,
    pub alt: Option<String>,
    /// Rendered as a sibling italic paragraph after the image.
    pub caption: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub byte_size: Option<u64>,
    pub content_type: Option<String>,
}

impl ImageSpec {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Append-only accumulator of top-level blocks.
///
/// Every method pushes one or more blocks and returns `&mut Self` for
/// chaining. Nothing here fails: text is taken literally and heading levels
/// are clamped.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Node>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph of mixed parts. Plain strings become unmarked text; empty
    /// parts are dropped, so no parts gives an empty gap paragraph.
    pub fn paragraph<I, P>(&mut self, parts: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Text>,
    {
        let children = parts
            .into_iter()
            .map(Into::into)
            .filter(|t: &Text| !t.content.is_empty())
            .map(Node::Text)
            .collect();
        self.push(Node::Paragraph(children))
    }

    pub fn heading(&mut self, content: impl Into<String>, level: i64) -> &mut Self {
        self.push(Node::heading(level, text_children(content.into())))
    }

    pub fn image(&mut self, spec: ImageSpec) -> &mut Self {
        let ImageSpec {
            src,
            alt,
            caption,
            width,
            height,
            byte_size,
            content_type,
        } = spec;

        let mut image = Image::new(src);
        image.alt = alt;
        image.width = width;
        image.height = height;
        image.byte_size = byte_size;
        image.content_type = content_type;

        self.push(Node::CaptionedImage {
            image,
            trailing: vec![],
        });
        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            self.push(Node::Paragraph(vec![Node::Text(italic(caption))]));
        }
        self
    }

    pub fn blockquote(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(Node::Blockquote(vec![Node::Paragraph(text_children(
            content.into(),
        ))]))
    }

    pub fn bullet_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Node::BulletList(list_items(items)))
    }

    pub fn ordered_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ordered_list_from(1, items)
    }

    pub fn ordered_list_from<I, S>(&mut self, start_order: u32, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Node::OrderedList {
            start_order,
            items: list_items(items),
        })
    }

    pub fn horizontal_rule(&mut self) -> &mut Self {
        self.push(Node::HorizontalRule)
    }

    pub fn code_block(
        &mut self,
        source: impl Into<String>,
        language: impl Into<String>,
    ) -> &mut Self {
        self.push(Node::CodeBlock {
            language: language.into(),
            children: text_children(source.into()),
        })
    }

    pub fn youtube(&mut self, video_id: impl Into<String>) -> &mut Self {
        self.push(Node::Embed(Embed::YouTube(YouTube::new(video_id))))
    }

    pub fn twitter(
        &mut self,
        url: impl Into<String>,
        full_text: impl Into<String>,
        username: impl Into<String>,
    ) -> &mut Self {
        self.push(Node::Embed(Embed::Twitter(Tweet::new(
            url, full_text, username,
        ))))
    }

    /// Appends a pre-built node. Inline nodes are wrapped so the root only
    /// ever holds blocks.
    pub fn push(&mut self, node: Node) -> &mut Self {
        self.blocks.push(node.into_block());
        self
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) -> &mut Self {
        for node in nodes {
            self.push(node);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Node] {
        &self.blocks
    }

    pub fn build(self) -> Doc {
        Doc::with_children(self.blocks)
    }

    /// The accumulated blocks, for use as an append payload.
    pub fn into_nodes(self) -> Vec<Node> {
        self.blocks
    }

    /// Canonical JSON text of the document built so far.
    pub fn to_json(&self) -> String {
        encode_doc(&Doc::with_children(self.blocks.clone())).to_string()
    }
}

fn text_children(content: String) -> Vec<Node> {
    if content.is_empty() {
        vec![]
    } else {
        vec![Node::Text(Text::plain(content))]
    }
}

fn list_items<I, S>(items: I) -> Vec<ListItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(|item| ListItem {
            children: vec![Node::Paragraph(text_children(item.into()))],
        })
        .collect()
}
