//! # Inline Parsing
//!
//! Cursor-based scan of a single line of paragraph text.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum (Text, Emphasis, Link) over byte spans
//! - **`kinds`**: inline-specific types with owned delimiters
//! - **`cursor`**: `Cursor` for byte-by-byte parsing with position tracking
//! - **`parser`**: `scan_inline()` and `parse_inline()` with `try_parse_*` helpers
//!
//! ## Precedence
//!
//! Leftmost match wins; at one position strong beats star italic beats
//! underscore italic beats link. `**[a](b)**` is therefore bold text.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{parse_inline, scan_inline};
pub use types::InlineNode;
