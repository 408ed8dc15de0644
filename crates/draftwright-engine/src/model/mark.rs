use serde_json::Value;

/// An inline annotation attached to a [`Text`](super::Text) node.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link {
        href: String,
        title: Option<String>,
    },
    /// A mark decoded from a remote tree that the model does not know.
    /// Kept verbatim so it survives a merge.
    Other(Value),
}

/// Identity of a mark for set membership.
#[derive(Debug, Clone, PartialEq)]
enum MarkKey<'a> {
    Strong,
    Em,
    Code,
    Link,
    Other(&'a Value),
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            href: href.into(),
            title: None,
        }
    }

    /// Schema type name used on the wire, `None` for passthrough marks.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Mark::Strong => Some("strong"),
            Mark::Em => Some("em"),
            Mark::Code => Some("code"),
            Mark::Link { .. } => Some("link"),
            Mark::Other(_) => None,
        }
    }

    fn key(&self) -> MarkKey<'_> {
        match self {
            Mark::Strong => MarkKey::Strong,
            Mark::Em => MarkKey::Em,
            Mark::Code => MarkKey::Code,
            Mark::Link { .. } => MarkKey::Link,
            Mark::Other(raw) => MarkKey::Other(raw),
        }
    }
}

/// The set of marks on a text node.
///
/// Duplicate kinds collapse and a node carries at most one link: inserting a
/// second link replaces the first. Insertion order is kept for serialization
/// but ignored by equality.
#[derive(Debug, Clone, Default)]
pub struct Marks(Vec<Mark>);

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mark, returning `true` if the set did not already hold a mark
    /// of the same kind.
    pub fn insert(&mut self, mark: Mark) -> bool {
        if let Some(existing) = self.0.iter_mut().find(|m| m.key() == mark.key()) {
            *existing = mark;
            return false;
        }
        self.0.push(mark);
        true
    }

    pub fn contains(&self, mark: &Mark) -> bool {
        self.0.iter().any(|m| m == mark)
    }

    pub fn has_strong(&self) -> bool {
        self.0.iter().any(|m| matches!(m, Mark::Strong))
    }

    pub fn has_em(&self) -> bool {
        self.0.iter().any(|m| matches!(m, Mark::Em))
    }

    pub fn has_code(&self) -> bool {
        self.0.iter().any(|m| matches!(m, Mark::Code))
    }

    /// The link target, if the node is a link.
    pub fn link_href(&self) -> Option<&str> {
        self.0.iter().find_map(|m| match m {
            Mark::Link { href, .. } => Some(href.as_str()),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Marks {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|m| other.contains(m))
    }
}

impl FromIterator<Mark> for Marks {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        let mut marks = Marks::new();
        for mark in iter {
            marks.insert(mark);
        }
        marks
    }
}

impl From<Mark> for Marks {
    fn from(mark: Mark) -> Self {
        Marks(vec![mark])
    }
}

impl<'a> IntoIterator for &'a Marks {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
