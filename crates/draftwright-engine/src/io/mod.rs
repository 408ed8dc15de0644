use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::model::Doc;
use crate::reconcile::{DraftId, DraftRecord};
use crate::session::{DraftStore, apply_stored_body};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid draft record {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid drafts directory: {0}")]
    InvalidDraftsDir(String),
    #[error("Draft id cannot be used as a file name: {0:?}")]
    InvalidDraftId(String),
}

/// Drafts kept as `<root>/<id>.json`, each holding one [`DraftRecord`].
///
/// A draft with no file yet reads as an empty record, so the first append
/// creates it.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub const EXTENSION: &'static str = "json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens a store, creating its directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).map_err(IoError::Io)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, id: &DraftId) -> Result<PathBuf, IoError> {
        let name = id.as_str();
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !valid {
            return Err(IoError::InvalidDraftId(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{}", Self::EXTENSION)))
    }

    pub fn read_record(&self, id: &DraftId) -> Result<DraftRecord, IoError> {
        let path = self.record_path(id)?;
        if !path.exists() {
            debug!("No record for draft {id} at {}, starting empty", path.display());
            return Ok(DraftRecord::new(id.clone()));
        }

        let text = fs::read_to_string(&path).map_err(IoError::Io)?;
        let mut record: DraftRecord = serde_json::from_str(&text)
            .map_err(|source| IoError::InvalidRecord { path: path.clone(), source })?;
        record.id.get_or_insert_with(|| id.clone());
        debug!("Read draft {id} from {}", path.display());
        Ok(record)
    }

    pub fn write_record(&self, id: &DraftId, record: &DraftRecord) -> Result<(), IoError> {
        let path = self.record_path(id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(IoError::Io)?;
        }

        let text = serde_json::to_string_pretty(record)
            .map_err(|source| IoError::InvalidRecord { path: path.clone(), source })?;
        fs::write(&path, text).map_err(IoError::Io)?;
        info!("Wrote draft {id} to {}", path.display());
        Ok(())
    }

    /// Ids of all stored drafts, sorted.
    pub fn list_drafts(&self) -> Result<Vec<DraftId>, IoError> {
        if !self.root.exists() {
            return Err(IoError::InvalidDraftsDir(
                "drafts directory not found".to_string(),
            ));
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(IoError::Io)? {
            let path = entry.map_err(IoError::Io)?.path();
            if path.is_file()
                && let Some(ext) = path.extension()
                && ext == Self::EXTENSION
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(DraftId::new(stem));
            }
        }
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }
}

impl DraftStore for FileStore {
    type Error = IoError;

    fn fetch(&self, id: &DraftId) -> Result<DraftRecord, Self::Error> {
        self.read_record(id)
    }

    fn store(&mut self, id: &DraftId, doc: &Doc) -> Result<(), Self::Error> {
        let mut record = self.read_record(id)?;
        apply_stored_body(&mut record, doc);
        self.write_record(id, &record)
    }
}
