//! # Draft Reconciler
//!
//! Merges new content into a previously fetched draft.
//!
//! - **`resolve`**: `DraftRecord` and the source-of-truth resolution between
//!   its structured and serialized bodies
//! - **`operation`**: `ContentOperation` (replace / append) and
//!   `SectionHeader`
//! - **`fixup`**: idempotent image redirect computation
//! - **`error`**: `ReconcileError` and its `ErrorKind`
//!
//! [`reconcile`] is a pure function of the record, the operation and the
//! [`ReconcileContext`]: no I/O, no retries, no partial results.

pub mod error;
pub mod fixup;
pub mod operation;
pub mod resolve;

pub use error::{ErrorKind, ReconcileError};
pub use fixup::{fix_image_redirects, redirect_url};
pub use operation::{ContentOperation, SectionHeader};
pub use resolve::{BodySource, DraftId, DraftRecord, resolve_current_content, resolve_with_source};

use log::debug;

use crate::model::{Doc, Node};

/// Where the merged draft lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileContext {
    /// Falls back to the record's own id when unset.
    pub draft_id: Option<DraftId>,
    /// Publication origin, e.g. `https://example.substack.com`.
    pub publication_origin: String,
}

impl ReconcileContext {
    pub fn new(publication_origin: impl Into<String>) -> Self {
        Self {
            draft_id: None,
            publication_origin: publication_origin.into(),
        }
    }

    pub fn for_draft(mut self, draft_id: impl Into<DraftId>) -> Self {
        self.draft_id = Some(draft_id.into());
        self
    }
}

/// Applies `operation` to the draft in `record` and returns the new tree.
pub fn reconcile(
    record: &DraftRecord,
    operation: ContentOperation,
    context: &ReconcileContext,
) -> Result<Doc, ReconcileError> {
    let draft_id = context
        .draft_id
        .as_ref()
        .or(record.id.as_ref())
        .ok_or(ReconcileError::MissingDraftId {
            operation: operation.name(),
        })?;

    let mut doc = match operation {
        ContentOperation::Replace(nodes) => Doc::with_children(into_blocks(nodes)),
        ContentOperation::Append { nodes, section } => {
            let mut doc = resolve_current_content(record)?;
            if let Some(section) = section {
                doc.children.push(section.to_node());
            }
            doc.children.extend(into_blocks(nodes));
            doc
        }
    };

    let fixed = fix_image_redirects(&mut doc, draft_id, &context.publication_origin);
    debug!(
        "Reconciled draft {draft_id}: {} blocks, {fixed} image redirects set",
        doc.len()
    );
    Ok(doc)
}

fn into_blocks(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(Node::into_block).collect()
}
