use super::kinds::{BlockQuote, CodeFence, FenceOpen, Math, MathStart, QuoteOpen};

/// Classification of a single line containing only local facts.
///
/// Each line is classified independently; lookahead (tables, fence bodies,
/// quote continuations) is the builder's job.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// 0-based line index.
    pub index: usize,
    /// Line text without its terminator.
    pub text: &'a str,
    /// Whitespace only.
    pub is_blank: bool,
    /// Set if the line opens a code fence.
    pub fence: Option<FenceOpen>,
    /// Set if the line is quote-prefixed.
    pub quote: Option<QuoteOpen>,
    /// First math opener in the line, if any.
    pub math: Option<MathStart>,
}

/// Classifies individual lines for the block segmenter.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify<'a>(&self, index: usize, text: &'a str) -> LineClass<'a> {
        LineClass {
            index,
            text,
            is_blank: text.trim().is_empty(),
            fence: CodeFence::open(text),
            quote: BlockQuote::open(text),
            math: Math::find(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_line_is_blank() {
        let c = MarkdownLineClassifier.classify(3, " \t ");
        assert!(c.is_blank);
        assert_eq!(c.index, 3);
        assert!(c.fence.is_none() && c.quote.is_none() && c.math.is_none());
    }

    #[test]
    fn fence_and_quote_facts() {
        let c = MarkdownLineClassifier.classify(0, "```rust");
        assert!(c.fence.is_some());
        let c = MarkdownLineClassifier.classify(0, "> quoted $x$");
        assert!(c.quote.is_some());
        assert!(c.math.is_some());
    }
}
