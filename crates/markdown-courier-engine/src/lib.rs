//! # markdown-courier engine
//!
//! Converts markdown into an element tree and a canonical markdown string,
//! resolving footnotes and the table of contents across both.
//!
//! ## Components
//!
//! - **`parsing`**: Block Segmenter and Inline Scanner
//! - **`render`**: Renderer and its collaborator traits
//! - **`resolve`**: footnote numbering and the heading outline
//! - **`io`**: content source
//! - **`pipeline`**: read → strip comments → segment → render

pub mod io;
pub mod parsing;
pub mod pipeline;
pub mod render;
pub mod resolve;

pub use io::{ContentSource, FsContentSource, IoError};
pub use parsing::blocks::{Block, BlockKind, QuoteKind};
pub use parsing::inline::{Dimensions, Marker, Token};
pub use parsing::{segment_document, tokenize_for_block};
pub use pipeline::{render_document, render_markdown};
pub use render::{
    DocumentParts, Element, HostBuffer, ImageRasterizer, MainImage, MemoryBuffer, Node,
    NoRasterizer, RasterError, RasterRequest, RasterizedImage, RenderDiagnostic, RenderOutput,
    RenderSettings, Renderer, Severity, Theme, TocStyle,
};
pub use resolve::{FootnoteTable, Toc, TocNode};
