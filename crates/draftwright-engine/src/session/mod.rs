//! # Draft Editor
//!
//! Read → reconcile → write over a [`DraftStore`].
//!
//! The sequence is optimistic, not locked: two editors appending to the same
//! draft at once can each read the old content, and the later write drops
//! the earlier one's blocks. Callers that share a draft must sequence their
//! edits themselves.

mod memory;

pub use memory::{MemoryStore, MemoryStoreError};

use log::info;
use thiserror::Error;

use crate::model::{Doc, DocumentBuilder, ImageSpec, Node, encode_doc};
use crate::parsing::parse_markdown_blocks;
use crate::reconcile::{
    ContentOperation, DraftId, DraftRecord, ReconcileContext, ReconcileError, SectionHeader,
    reconcile, resolve_current_content,
};
use crate::snippets;

/// The transport collaborator's interface: fetch a draft, store a new body.
pub trait DraftStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(&self, id: &DraftId) -> Result<DraftRecord, Self::Error>;

    fn store(&mut self, id: &DraftId, doc: &Doc) -> Result<(), Self::Error>;
}

/// Applies a stored body the way the remote API does: the structured field
/// takes the tree and the serialized field is cleared.
pub fn apply_stored_body(record: &mut DraftRecord, doc: &Doc) {
    record.body_json = Some(encode_doc(doc));
    record.draft_body = None;
}

#[derive(Debug, Error)]
pub enum SessionError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("Failed to access draft store: {0}")]
    Store(#[source] E),
}

/// Summary of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReport {
    pub draft_id: DraftId,
    pub block_count: usize,
    /// Number of top-level headings in the stored draft.
    pub section_count: usize,
}

pub struct DraftEditor<S> {
    store: S,
    publication_origin: String,
}

impl<S: DraftStore> DraftEditor<S> {
    pub fn new(store: S, publication_origin: impl Into<String>) -> Self {
        Self {
            store,
            publication_origin: publication_origin.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The draft's current content as the reconciler sees it.
    pub fn current(&self, id: &DraftId) -> Result<Doc, SessionError<S::Error>> {
        let record = self.store.fetch(id).map_err(SessionError::Store)?;
        Ok(resolve_current_content(&record)?)
    }

    pub fn append(
        &mut self,
        id: &DraftId,
        nodes: Vec<Node>,
        section: Option<SectionHeader>,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        let operation = ContentOperation::Append { nodes, section };
        self.apply(id, operation)
    }

    pub fn append_markdown(
        &mut self,
        id: &DraftId,
        markdown: &str,
        section: Option<SectionHeader>,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        self.append(id, parse_markdown_blocks(markdown), section)
    }

    pub fn replace(
        &mut self,
        id: &DraftId,
        nodes: Vec<Node>,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        self.apply(id, ContentOperation::Replace(nodes))
    }

    pub fn replace_markdown(
        &mut self,
        id: &DraftId,
        markdown: &str,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        self.replace(id, parse_markdown_blocks(markdown))
    }

    /// Appends one image (and its caption paragraph) to the end of the draft.
    pub fn add_image(
        &mut self,
        id: &DraftId,
        spec: ImageSpec,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        let mut b = DocumentBuilder::new();
        b.image(spec);
        self.append(id, b.into_nodes(), None)
    }

    pub fn add_code_snippet(
        &mut self,
        id: &DraftId,
        source: &str,
        language: &str,
        filename: Option<&str>,
        caption: Option<&str>,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        let nodes = snippets::code_snippet(source, language, filename, caption);
        self.append(id, nodes, None)
    }

    fn apply(
        &mut self,
        id: &DraftId,
        operation: ContentOperation,
    ) -> Result<AppendReport, SessionError<S::Error>> {
        let name = operation.name();
        let record = self.store.fetch(id).map_err(SessionError::Store)?;
        let context = ReconcileContext::new(self.publication_origin.clone()).for_draft(id.clone());

        let doc = reconcile(&record, operation, &context)?;
        self.store.store(id, &doc).map_err(SessionError::Store)?;

        let report = AppendReport {
            draft_id: id.clone(),
            block_count: doc.len(),
            section_count: doc.section_count(),
        };
        info!(
            "Applied {name} to draft {}: {} blocks, {} sections",
            report.draft_id, report.block_count, report.section_count
        );
        Ok(report)
    }
}
