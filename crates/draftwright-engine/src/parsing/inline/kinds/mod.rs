//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! - **`Emphasis`**: `**`, `*`, `_`
//! - **`Link`**: `[`, `](`, `)`
//!
//! The parser calls these constants; it never hardcodes `**` or `](`.

pub mod emphasis;
pub mod link;

pub use emphasis::Emphasis;
pub use link::Link;
