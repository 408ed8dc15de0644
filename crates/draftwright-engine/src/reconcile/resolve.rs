use std::fmt;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::{DecodeError, Doc, decode_doc};

use super::error::ReconcileError;

/// Longest slice of a corrupt body quoted back in an error.
const EXCERPT_CHARS: usize = 80;

/// Identifier of a remote draft. Accepts a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for DraftId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for DraftId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DraftId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for DraftId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => DraftId::from(n),
            RawId::Text(s) => DraftId(s),
        })
    }
}

/// A draft as the remote API hands it out.
///
/// The body may be present twice: `body_json` holds the tree as structured
/// JSON, `draft_body` holds it as serialized text. Either, both or neither
/// may be set, and they may disagree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DraftId>,
    #[serde(default)]
    pub body_json: Option<Value>,
    #[serde(default)]
    pub draft_body: Option<String>,
}

impl DraftRecord {
    pub fn new(id: impl Into<DraftId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_body_json(mut self, body: Value) -> Self {
        self.body_json = Some(body);
        self
    }

    pub fn with_draft_body(mut self, body: impl Into<String>) -> Self {
        self.draft_body = Some(body.into());
        self
    }
}

/// Which representation a resolution used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    Structured,
    Serialized,
    Empty,
}

/// Determines the true current content of a draft.
///
/// The structured field wins whenever it is set. The serialized field is only
/// consulted when the structured one is absent, and a serialized body that
/// does not parse is an error rather than an empty document. With neither,
/// the draft is empty.
pub fn resolve_current_content(record: &DraftRecord) -> Result<Doc, ReconcileError> {
    resolve_with_source(record).map(|(doc, _)| doc)
}

pub fn resolve_with_source(record: &DraftRecord) -> Result<(Doc, BodySource), ReconcileError> {
    let resolved = match (&record.body_json, non_blank(record.draft_body.as_deref())) {
        (Some(Value::String(text)), fallback) if text.trim().is_empty() => match fallback {
            Some(text) => (parse_serialized(text)?, BodySource::Serialized),
            None => (Doc::new(), BodySource::Empty),
        },
        (Some(Value::String(text)), _) => (parse_serialized(text)?, BodySource::Structured),
        (Some(value), _) if !value.is_null() => (decode(value)?, BodySource::Structured),
        (_, Some(text)) => (parse_serialized(text)?, BodySource::Serialized),
        (_, None) => (Doc::new(), BodySource::Empty),
    };

    debug!(
        "Resolved draft {} from {:?} body ({} blocks)",
        record.id.as_ref().map_or("<unsaved>", DraftId::as_str),
        resolved.1,
        resolved.0.len()
    );
    Ok(resolved)
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn parse_serialized(text: &str) -> Result<Doc, ReconcileError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| ReconcileError::CorruptBody {
            excerpt: excerpt(text),
            source,
        })?;
    decode(&value)
}

fn decode(value: &Value) -> Result<Doc, ReconcileError> {
    decode_doc(value).map_err(|e| match e {
        DecodeError::NotAnObject { found } => ReconcileError::NotADocument { found },
    })
}

fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
