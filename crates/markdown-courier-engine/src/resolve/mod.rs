//! # Footnote/TOC Resolver
//!
//! State threaded through the renderer: footnote numbers assigned at first
//! reference, and the heading outline built as headings are rendered.

pub mod footnotes;
pub mod toc;

pub use footnotes::{FootnoteTable, footnote_anchor, superscript};
pub use toc::{Toc, TocBuilder, TocHeading, TocNode, slugify};
