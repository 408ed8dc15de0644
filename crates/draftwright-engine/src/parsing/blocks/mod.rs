//! # Block Parsing
//!
//! Two-phase, line-oriented block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (blank, closes a fence, what it opens)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps at most one
//!    multi-line block open and emits model nodes as blocks close
//!
//! ## Modules
//!
//! - **`kinds`**: block-specific types with owned delimiters
//! - **`open`**: `try_open` dispatch in trigger precedence order
//! - **`classify`**: `MarkdownLineClassifier`
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - One pass, no backtracking across block boundaries
//! - Fenced code blocks are raw zones: lines are kept as written
//! - Lists do not nest

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use open::{BlockOpen, try_open};
