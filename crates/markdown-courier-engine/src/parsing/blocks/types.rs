use serde::Serialize;

use crate::parsing::rope::span::Span;

/// Whether a quote was written with `>` or `>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuoteKind {
    Blockquote,
    Pullquote,
}

/// The kind of a block, with construct-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// A paragraph of inline-scannable text.
    Content,
    Heading {
        level: u8,
    },
    /// One or more newline-joined items of the same ordering.
    List {
        ordered: bool,
    },
    HorizontalRule,
    /// A fenced code block.
    CodeBlock {
        /// Info-string language before any modifier flags.
        language: String,
        caption: Option<String>,
        /// Set by a `!` modifier.
        to_png: bool,
        /// Set by a `*` modifier.
        use_light_theme: bool,
    },
    /// A single indented code line.
    Code,
    /// Pipe table; `body[0]` is the header row.
    Table {
        body: Vec<Vec<String>>,
    },
    Quote {
        kind: QuoteKind,
    },
    Callout {
        name: String,
    },
    /// A footnote definition, `[^id]: text`.
    Footnote {
        id: String,
    },
    Math,
    Break {
        count: usize,
    },
}

/// A line-range-scoped unit of document structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    /// First source line (0-based, inclusive).
    pub line_start: usize,
    /// Last source line (0-based, inclusive).
    pub line_end: usize,
    /// Inner text with grammar markers stripped.
    pub content: String,
    /// Explicit anchor from a trailing or standalone `^id`.
    pub id: Option<String>,
    /// Byte span of the source lines this block was cut from.
    pub span: Span,
}

impl Block {
    pub fn new(kind: BlockKind, line_start: usize, line_end: usize, content: impl Into<String>) -> Self {
        Self {
            kind,
            line_start,
            line_end,
            content: content.into(),
            id: None,
            span: Span::default(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn is_break(&self) -> bool {
        matches!(self.kind, BlockKind::Break { .. })
    }

    /// Short kind label used in asset names and snapshots.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            BlockKind::Content => "content",
            BlockKind::Heading { .. } => "heading",
            BlockKind::List { .. } => "list",
            BlockKind::HorizontalRule => "rule",
            BlockKind::CodeBlock { .. } => "code",
            BlockKind::Code => "indented-code",
            BlockKind::Table { .. } => "table",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Footnote { .. } => "footnote",
            BlockKind::Math => "math",
            BlockKind::Break { .. } => "break",
        }
    }
}
