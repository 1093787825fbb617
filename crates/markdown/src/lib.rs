//! Markdown rendering for subgraph entity references.
//!
//! An [`EntityDocument`] holds the entities to document and their stored
//! fields; [`render`] turns it into a page with a linked index followed by
//! one field table per entity.

mod document;
mod render;

pub use document::{EntityDocument, EntitySection};
pub use render::{render, render_with, RenderOptions, DEFAULT_TITLE};
