//! One type per block construct, each owning its delimiters and detector.

pub mod anchor;
pub mod block_quote;
pub mod code_fence;
pub mod footnote;
pub mod heading;
pub mod indented_code;
pub mod list;
pub mod math;
pub mod rule;
pub mod table;

pub use anchor::Anchor;
pub use block_quote::{BlockQuote, QuoteOpen};
pub use code_fence::{CodeFence, FenceKind, FenceOpen};
pub use footnote::FootnoteDef;
pub use heading::Heading;
pub use indented_code::IndentedCode;
pub use list::ListItem;
pub use math::{Math, MathStart};
pub use rule::Rule;
pub use table::{Table, TableHead};
