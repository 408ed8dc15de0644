//! # Document Model
//!
//! Typed tree in the editor's node/mark schema.
//!
//! - **`node`**: `Doc`, `Node` and the leaf payloads (`Text`, `Image`, `Embed`)
//! - **`mark`**: `Mark` and the set type `Marks`
//! - **`codec`**: canonical JSON form, with passthrough for remote content
//!   the model does not type
//! - **`builder`**: `DocumentBuilder` and the free text constructors

pub mod builder;
pub mod codec;
pub mod mark;
pub mod node;

pub use builder::{DocumentBuilder, ImageSpec, bold, code, italic, link, text};
pub use codec::{DecodeError, decode_doc, decode_node, encode_doc, encode_node};
pub use mark::{Mark, Marks};
pub use node::{Doc, Embed, HeadingLevel, Image, ListItem, Node, Text, Tweet, YouTube};
