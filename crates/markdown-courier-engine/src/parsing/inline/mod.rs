//! # Inline Scanner
//!
//! Turns the text of one block into an ordered sequence of [`Token`]s.
//!
//! ## Architecture
//!
//! A forward scan per line with sub-states entered on sentinel characters
//! (`*`, `_`, `` ` ``, `~`, `=`, `!`, `[`, `$`, `\`). Paired markers go
//! through an open-token stack; closing a marker that is not innermost
//! closes and reopens the markers opened after it.
//!
//! ## Modules
//!
//! - **`types`**: `Token`, `Marker`, `Dimensions`
//! - **`kinds`**: delimiter owners (CodeSpan, WikiLink, Link, Emphasis, InlineMath)
//! - **`cursor`**: char-aware `Cursor`
//! - **`emphasis`**: `OpenStack` with close-and-reopen
//! - **`parser`**: `tokenize_block()` entry point
//!
//! ## Raw Zone Precedence
//!
//! Code spans and math suppress all other scanning inside them:
//! `` `[[not a link]]` `` is a single `Code` token.

pub mod cursor;
pub mod emphasis;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{tokenize_block, tokenize_line};
pub use types::{Dimensions, Marker, Token};
