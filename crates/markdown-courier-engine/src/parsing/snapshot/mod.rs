//! # Snapshot Testing Support
//!
//! Utilities for testing the segmenter and scanner via snapshot assertions
//! and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts blocks and their tokens to a stable, serializable
//!   `Snap` for `insta` snapshot testing
//! - **`invariants`**: Runtime checks (spans in bounds, line ranges increasing,
//!   paired markers balanced and properly nested)

pub mod invariants;
pub mod normalize;

pub use invariants::{check as invariants, check_balance};
pub use normalize::{Snap, normalize, token_label};
