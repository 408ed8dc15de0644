//! Block kinds that own their syntax delimiters.
//!
//! The classifier and builder call these; they never hardcode `>` or
//! a fence string themselves.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod image;
pub mod list;
pub mod rule;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use heading::AtxHeading;
pub use image::ImageLine;
pub use list::{BulletList, OrderedList};
pub use rule::ThematicBreak;
