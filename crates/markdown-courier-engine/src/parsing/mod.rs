pub mod blocks;
pub mod comments;
pub mod inline;
pub mod rope;
pub mod snapshot;

use xi_rope::Rope;

use blocks::{Block, BlockBuilder, BlockKind};
use inline::{Token, tokenize_block};
use rope::SourceLines;

/// Segments a whole document into blocks.
pub fn segment_document(rope: &Rope) -> Vec<Block> {
    let lines = SourceLines::from_rope(rope);
    BlockBuilder::new(&lines).build()
}

/// Inline tokens for a block's content.
///
/// Code bodies are scanned in code mode; tables, math, rules and breaks have
/// no inline stream.
pub fn tokenize_for_block(b: &Block) -> Vec<Token> {
    match b.kind {
        BlockKind::Content
        | BlockKind::Heading { .. }
        | BlockKind::List { .. }
        | BlockKind::Quote { .. }
        | BlockKind::Callout { .. }
        | BlockKind::Footnote { .. } => tokenize_block(&b.content, false),
        BlockKind::CodeBlock { .. } | BlockKind::Code => {
            tokenize_block(b.content.trim_end_matches('\n'), true)
        }
        BlockKind::HorizontalRule
        | BlockKind::Table { .. }
        | BlockKind::Math
        | BlockKind::Break { .. } => vec![],
    }
}
