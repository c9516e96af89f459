use xi_rope::Rope;

use super::span::Span;

/// A single physical line of the source document.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 0-based line index.
    pub index: usize,
    /// Byte span of this line in the rope (includes the newline if present).
    pub span: Span,
    /// The line text with its terminator (`\n` or `\r\n`) removed.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so spans stay exact; the terminator is stripped from
/// `text` only.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            index,
            span: Span { start, end: offset },
            text: line.trim_end_matches(['\r', '\n']).to_string(),
        }
    })
}

/// Random-access view over every line of a document.
///
/// The segmenter looks ahead an arbitrary number of lines (fences, quotes,
/// footnote continuations, tables), so lines are materialized once up front.
#[derive(Debug, Clone, Default)]
pub struct SourceLines {
    lines: Vec<LineRef>,
}

impl SourceLines {
    pub fn from_rope(rope: &Rope) -> Self {
        Self {
            lines: lines_with_spans(rope).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of line `index`, or `None` past the end of the document.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.text.as_str())
    }

    /// Byte span covering lines `start..=end` (clamped to the document).
    pub fn span_of(&self, start: usize, end: usize) -> Span {
        match (self.lines.get(start), self.lines.get(end.min(self.len().saturating_sub(1)))) {
            (Some(first), Some(last)) => first.span.cover(last.span),
            _ => Span::default(),
        }
    }

    pub fn last_index(&self) -> usize {
        self.len().saturating_sub(1)
    }
}
