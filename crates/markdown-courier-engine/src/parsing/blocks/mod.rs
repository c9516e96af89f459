//! # Block Segmenter
//!
//! Splits a document into an ordered sequence of [`Block`]s, each tagged with
//! the source lines it came from.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line gets a `LineClass` of
//!    local facts (blank, fence opener, quote prefix, first math opener).
//! 2. **Dispatch** (`open`): `try_open` tests constructs in a fixed priority
//!    order, looking one line ahead for table dividers.
//! 3. **Block Construction** (`builder`): `BlockBuilder` keeps a pending
//!    paragraph buffer and consumes multi-line constructs with lookahead.
//!
//! ## Modules
//!
//! - **`types`**: `Block`, `BlockKind`, `QuoteKind`
//! - **`kinds`**: one type per construct owning its delimiters
//! - **`classify`**: `MarkdownLineClassifier`
//! - **`open`**: `try_open` priority dispatch
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - Blocks come out in document order; only math split out of running text
//!   shares a line with its neighbours
//! - Fenced code bodies are raw: nothing inside is segmented
//! - Unterminated fences and display math consume to end of document
//! - Segmentation never fails; malformed constructs degrade to paragraphs

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{Block, BlockKind, QuoteKind};
