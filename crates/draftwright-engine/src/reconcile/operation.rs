use chrono::NaiveTime;

use crate::model::{HeadingLevel, Node, Text};

/// Heading synthesized in front of appended content.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionHeader {
    pub title: String,
    pub level: HeadingLevel,
    /// Rendered as a ` (hh:mm AM)` suffix when set.
    pub timestamp: Option<NaiveTime>,
}

impl SectionHeader {
    pub const DEFAULT_LEVEL: i64 = 3;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            level: HeadingLevel::clamped(Self::DEFAULT_LEVEL),
            timestamp: None,
        }
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = HeadingLevel::clamped(level);
        self
    }

    pub fn at(mut self, time: NaiveTime) -> Self {
        self.timestamp = Some(time);
        self
    }

    pub fn heading_text(&self) -> String {
        match self.timestamp {
            Some(time) => format!("{} ({})", self.title, time.format("%I:%M %p")),
            None => self.title.clone(),
        }
    }

    pub fn to_node(&self) -> Node {
        let text = self.heading_text();
        let children = if text.is_empty() {
            vec![]
        } else {
            vec![Node::Text(Text::plain(text))]
        };
        Node::Heading {
            level: self.level,
            children,
        }
    }
}

/// What to do with a draft's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOperation {
    /// The draft becomes exactly these blocks.
    Replace(Vec<Node>),
    /// Existing blocks, then the optional section heading, then these blocks.
    /// No deduplication.
    Append {
        nodes: Vec<Node>,
        section: Option<SectionHeader>,
    },
}

impl ContentOperation {
    pub fn replace(nodes: Vec<Node>) -> Self {
        ContentOperation::Replace(nodes)
    }

    pub fn append(nodes: Vec<Node>) -> Self {
        ContentOperation::Append {
            nodes,
            section: None,
        }
    }

    pub fn append_section(nodes: Vec<Node>, section: SectionHeader) -> Self {
        ContentOperation::Append {
            nodes,
            section: Some(section),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentOperation::Replace(_) => "replace",
            ContentOperation::Append { .. } => "append",
        }
    }
}
