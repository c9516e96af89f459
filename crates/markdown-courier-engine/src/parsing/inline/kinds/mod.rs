//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters. The scanner
//! calls these constants; it never hardcodes `[[` or `` ` ``.

pub mod code_span;
pub mod emphasis;
pub mod link;
pub mod math;
pub mod wikilink;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use link::Link;
pub use math::InlineMath;
pub use wikilink::WikiLink;
