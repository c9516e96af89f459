use xi_rope::Rope;

use crate::parsing::{blocks::Block, inline::Token, tokenize_for_block};

/// Validates segmenter and scanner output invariants.
///
/// Asserts that:
/// - All block spans are within rope bounds
/// - Line ranges are well formed and in document order (math split out of
///   running text may share its line with the surrounding paragraphs)
/// - Every paired marker in a block's token stream is balanced
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[Block]) {
    let n = rope.len();
    let mut prev_end: Option<usize> = None;
    for b in blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (rope len: {})",
            b.span,
            n
        );
        assert!(
            b.line_start <= b.line_end,
            "inverted line range: {}..={}",
            b.line_start,
            b.line_end
        );
        if let Some(prev) = prev_end {
            assert!(
                prev <= b.line_start,
                "block at line {} overlaps previous block ending at {}",
                b.line_start,
                prev
            );
        }
        prev_end = Some(b.line_end);

        check_balance(&tokenize_for_block(b));
    }
}

/// Every paired marker opens and closes the same number of times, and
/// closes never outnumber opens at any point.
pub fn check_balance(tokens: &[Token]) {
    let mut open: Vec<Token> = vec![];
    for tok in tokens {
        if tok.marker().is_none() {
            continue;
        }
        if open.last() == Some(tok) {
            open.pop();
        } else {
            assert!(
                !open.contains(tok),
                "marker {tok:?} closed across an open inner marker in {tokens:?}"
            );
            open.push(tok.clone());
        }
    }
    assert!(open.is_empty(), "unbalanced markers {open:?} in {tokens:?}");
}
