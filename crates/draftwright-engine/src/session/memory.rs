use std::collections::HashMap;

use thiserror::Error;

use crate::model::Doc;
use crate::reconcile::{DraftId, DraftRecord};

use super::{DraftStore, apply_stored_body};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("Draft not found: {0}")]
    NotFound(DraftId),
}

/// In-memory drafts keyed by id. Only drafts that were inserted exist.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    drafts: HashMap<DraftId, DraftRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overwrites a draft. The record must carry its id.
    pub fn insert(&mut self, id: impl Into<DraftId>, mut record: DraftRecord) {
        let id = id.into();
        record.id = Some(id.clone());
        self.drafts.insert(id, record);
    }

    pub fn get(&self, id: &DraftId) -> Option<&DraftRecord> {
        self.drafts.get(id)
    }
}

impl DraftStore for MemoryStore {
    type Error = MemoryStoreError;

    fn fetch(&self, id: &DraftId) -> Result<DraftRecord, Self::Error> {
        self.drafts
            .get(id)
            .cloned()
            .ok_or_else(|| MemoryStoreError::NotFound(id.clone()))
    }

    fn store(&mut self, id: &DraftId, doc: &Doc) -> Result<(), Self::Error> {
        let record = self
            .drafts
            .get_mut(id)
            .ok_or_else(|| MemoryStoreError::NotFound(id.clone()))?;
        apply_stored_body(record, doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageSpec, Node};
    use crate::reconcile::{ErrorKind, SectionHeader};
    use crate::session::{DraftEditor, SessionError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ORIGIN: &str = "https://pub.test";

    fn seeded() -> (MemoryStore, DraftId) {
        let id = DraftId::from(7u64);
        let mut store = MemoryStore::new();
        store.insert(
            id.clone(),
            DraftRecord::default().with_draft_body(
                json!({
                    "type": "doc",
                    "content": [
                        { "type": "heading", "attrs": { "level": 2 }, "content": [{ "type": "text", "text": "Intro" }] },
                        { "type": "paragraph", "content": [{ "type": "text", "text": "Existing" }] },
                    ],
                })
                .to_string(),
            ),
        );
        (store, id)
    }

    #[test]
    fn store_moves_body_to_structured_field() {
        let (store, id) = seeded();
        let mut editor = DraftEditor::new(store, ORIGIN);
        editor.append(&id, vec![Node::HorizontalRule], None).unwrap();

        let record = editor.store().get(&id).unwrap();
        assert!(record.draft_body.is_none());
        assert_eq!(record.body_json.as_ref().unwrap()["content"][2]["type"], "horizontalRule");
    }

    #[test]
    fn repeated_image_appends_keep_everything() {
        let (store, id) = seeded();
        let mut editor = DraftEditor::new(store, ORIGIN);

        editor.add_image(&id, ImageSpec::new("https://x.test/1.png")).unwrap();
        let report = editor
            .add_image(&id, ImageSpec::new("https://x.test/2.png").caption("Two"))
            .unwrap();

        assert_eq!(report.block_count, 5);
        let doc = editor.current(&id).unwrap();
        assert_eq!(doc.children[1].plain_text(), "Existing");
        let redirects: Vec<_> = doc
            .images()
            .iter()
            .map(|i| i.internal_redirect().unwrap().to_string())
            .collect();
        assert_eq!(
            redirects,
            vec![
                "https://pub.test/i/7?img=https%3A%2F%2Fx.test%2F1.png",
                "https://pub.test/i/7?img=https%3A%2F%2Fx.test%2F2.png",
            ]
        );
    }

    #[test]
    fn append_markdown_with_section_counts_headings() {
        let (store, id) = seeded();
        let mut editor = DraftEditor::new(store, ORIGIN);
        let report = editor
            .append_markdown(&id, "## Next\n\nBody", Some(SectionHeader::new("Update")))
            .unwrap();

        assert_eq!(report.section_count, 3);
        assert_eq!(report.block_count, 5);
        assert_eq!(report.draft_id, id);
    }

    #[test]
    fn replace_markdown_discards_old_content() {
        let (store, id) = seeded();
        let mut editor = DraftEditor::new(store, ORIGIN);
        let report = editor.replace_markdown(&id, "only this").unwrap();
        assert_eq!(report.block_count, 1);
        assert_eq!(editor.current(&id).unwrap().children[0].plain_text(), "only this");
    }

    #[test]
    fn code_snippet_is_appended() {
        let (store, id) = seeded();
        let mut editor = DraftEditor::new(store, ORIGIN);
        editor
            .add_code_snippet(&id, "ls", "sh", Some("run.sh"), None)
            .unwrap();
        let doc = editor.current(&id).unwrap();
        assert!(matches!(doc.children[3], Node::CodeBlock { .. }));
    }

    #[test]
    fn unknown_draft_is_a_store_error() {
        let mut editor = DraftEditor::new(MemoryStore::new(), ORIGIN);
        let err = editor
            .append(&DraftId::from(1u64), vec![], None)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Store(MemoryStoreError::NotFound(_))
        ));
    }

    #[test]
    fn corrupt_body_is_not_overwritten() {
        let id = DraftId::from(3u64);
        let mut store = MemoryStore::new();
        store.insert(id.clone(), DraftRecord::default().with_draft_body("{oops"));
        let mut editor = DraftEditor::new(store, ORIGIN);

        let err = editor.append(&id, vec![Node::HorizontalRule], None).unwrap_err();
        let SessionError::Reconcile(inner) = err else {
            panic!("expected a reconcile error");
        };
        assert_eq!(inner.kind(), ErrorKind::DataIntegrity);
        assert_eq!(
            editor.store().get(&id).unwrap().draft_body.as_deref(),
            Some("{oops")
        );
    }
}
