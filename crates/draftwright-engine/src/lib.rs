//! Markdown and builder input to editor document trees, merged safely into
//! remote drafts.

pub mod io;
pub mod model;
pub mod parsing;
pub mod reconcile;
pub mod session;
pub mod snippets;

// Re-export key types for easier usage
pub use io::{FileStore, IoError};
pub use model::{Doc, DocumentBuilder, ImageSpec, Mark, Marks, Node, Text};
pub use parsing::{parse_markdown, parse_markdown_blocks};
pub use reconcile::{
    ContentOperation, DraftId, DraftRecord, ErrorKind, ReconcileContext, ReconcileError,
    SectionHeader, reconcile, resolve_current_content,
};
pub use session::{AppendReport, DraftEditor, DraftStore, MemoryStore, SessionError};
