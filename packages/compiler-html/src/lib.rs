//! # ASPxone HTML Compiler
//!
//! Turns a page's block tree into a static HTML-family document.
//!
//! ```text
//! blocks ──render_block──▶ fragments ──assemble──▶ document shell ──▶ Artifact
//! ```
//!
//! Embedded server-side code (`<% %>`, `@{ }`, page scripts) is carried as
//! opaque text. Nothing here executes or validates it.

mod compiler;
mod document;
mod markdown;


pub use compiler::{render_block, render_block_with_report, RenderReport, StyleWarning, INDENT};
pub use document::{
    assemble, export_document, Artifact, ExportOptions, BOOTSTRAP_CSS, BOOTSTRAP_JS,
    CONTENT_TYPE, FRAGMENT_INDENT, GENERATOR,
};
pub use markdown::render_inline;
