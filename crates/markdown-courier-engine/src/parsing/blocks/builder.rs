use crate::parsing::rope::SourceLines;

use super::{
    classify::MarkdownLineClassifier,
    kinds::{Anchor, BlockQuote, CodeFence, FenceOpen, FootnoteDef, Math, QuoteOpen, Table, TableHead},
    open::{BlockOpen, try_open},
    types::{Block, BlockKind},
};

#[derive(Debug, Default)]
enum LeafState {
    #[default]
    None,
    Paragraph {
        start: usize,
        end: usize,
        lines: Vec<String>,
        /// The last line is a standalone `^id` kept as text.
        literal_tail: bool,
    },
}

/// The segmenter state machine: one forward pass over the lines with a
/// pending-paragraph buffer, emitting [`Block`]s in document order.
pub struct BlockBuilder<'a> {
    lines: &'a SourceLines,
    leaf: LeafState,
    out: Vec<Block>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(lines: &'a SourceLines) -> Self {
        Self {
            lines,
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn build(mut self) -> Vec<Block> {
        let mut i = 0;
        while i < self.lines.len() {
            i = self.step(i);
        }
        // EOF flush
        self.flush_paragraph();
        self.out
    }

    /// Handles the construct starting at line `i`; returns the next line to visit.
    fn step(&mut self, i: usize) -> usize {
        let lines = self.lines;
        let text = lines.text(i).unwrap_or_default();
        let class = MarkdownLineClassifier.classify(i, text);

        match try_open(&class, lines.text(i + 1)) {
            Some(BlockOpen::Blank) => self.blank_run(i),
            Some(BlockOpen::Table(head)) => self.table(i, head),
            Some(BlockOpen::Fence(open)) => self.fence(i, open),
            Some(BlockOpen::Heading { level, text }) => {
                self.flush_paragraph();
                let (text, id) = Anchor::split_trailing(text);
                self.emit(Block::new(BlockKind::Heading { level }, i, i, text).with_id(id));
                i + 1
            }
            Some(BlockOpen::Rule) => {
                self.flush_paragraph();
                self.emit(Block::new(BlockKind::HorizontalRule, i, i, ""));
                i + 1
            }
            Some(BlockOpen::ListItem { ordered, text }) => {
                self.flush_paragraph();
                self.list_item(i, ordered, text);
                i + 1
            }
            Some(BlockOpen::Footnote { id, text }) => self.footnote(i, id, text),
            Some(BlockOpen::Anchor { id }) => {
                self.flush_paragraph();
                if !self.attach_anchor(i, id) {
                    self.extend_paragraph(i, text);
                    if let LeafState::Paragraph { literal_tail, .. } = &mut self.leaf {
                        *literal_tail = true;
                    }
                }
                i + 1
            }
            Some(BlockOpen::Quote(open)) => self.quote(i, open),
            Some(BlockOpen::Math(_)) => self.math(i, text),
            Some(BlockOpen::IndentedCode { text }) => {
                self.flush_paragraph();
                self.emit(Block::new(BlockKind::Code, i, i, text));
                i + 1
            }
            None => {
                self.extend_paragraph(i, text);
                i + 1
            }
        }
    }

    fn emit(&mut self, mut block: Block) {
        block.span = self.lines.span_of(block.line_start, block.line_end);
        self.out.push(block);
    }

    fn blank_run(&mut self, i: usize) -> usize {
        self.flush_paragraph();
        let mut end = i;
        while self.lines.text(end + 1).is_some_and(|t| t.trim().is_empty()) {
            end += 1;
        }
        let count = end - i + 1;
        self.emit(Block::new(BlockKind::Break { count }, i, end, ""));
        end + 1
    }

    fn table(&mut self, i: usize, head: TableHead) -> usize {
        self.flush_paragraph();
        let mut body = vec![head.header.clone()];
        // header + divider
        let mut end = i + 1;
        while let Some(row) = self.lines.text(end + 1) {
            if !Table::continues(&head, row) {
                break;
            }
            body.push(Table::fit(Table::cells(row), head.columns));
            end += 1;
        }
        let content = self.join_lines(i, end);
        self.emit(Block::new(BlockKind::Table { body }, i, end, content));
        end + 1
    }

    fn fence(&mut self, i: usize, open: FenceOpen) -> usize {
        self.flush_paragraph();
        let mut content = String::new();
        let mut line = i + 1;
        let end = loop {
            match self.lines.text(line) {
                Some(t) if CodeFence::closes(&open, t) => break line,
                Some(t) => {
                    content.push_str(t);
                    content.push('\n');
                    line += 1;
                }
                // unterminated: the block runs to the last line
                None => break self.lines.last_index().max(i),
            }
        };
        let kind = BlockKind::CodeBlock {
            language: open.language,
            caption: open.caption,
            to_png: open.to_png,
            use_light_theme: open.use_light_theme,
        };
        self.emit(Block::new(kind, i, end, content));
        end + 1
    }

    fn list_item(&mut self, i: usize, ordered: bool, text: &str) {
        let (text, id) = Anchor::split_trailing(text);
        let span = self.lines.span_of(i, i);
        match self.out.last_mut() {
            Some(last) if last.kind == (BlockKind::List { ordered }) => {
                last.content.push('\n');
                last.content.push_str(text);
                last.line_end = i;
                last.span = last.span.cover(span);
                if last.id.is_none() {
                    last.id = id;
                }
            }
            _ => self.emit(Block::new(BlockKind::List { ordered }, i, i, text).with_id(id)),
        }
    }

    fn footnote(&mut self, i: usize, id: &str, first: &str) -> usize {
        self.flush_paragraph();
        let mut parts: Vec<&str> = vec![];
        if !first.is_empty() {
            parts.push(first);
        }
        let mut end = i;
        while let Some(t) = self.lines.text(end + 1) {
            if !FootnoteDef::continues(t) {
                break;
            }
            parts.push(t.trim());
            end += 1;
        }
        let kind = BlockKind::Footnote { id: id.to_string() };
        self.emit(Block::new(kind, i, end, parts.join("\n")));
        end + 1
    }

    /// Attaches a standalone `^id` to the previous non-break block.
    fn attach_anchor(&mut self, i: usize, id: &str) -> bool {
        let Some(pos) = self.out.iter().rposition(|b| !b.is_break()) else {
            return false;
        };
        let is_last = pos + 1 == self.out.len();
        let span = self.lines.span_of(i, i);
        let target = &mut self.out[pos];
        target.id = Some(id.to_string());
        if is_last {
            target.line_end = i;
            target.span = target.span.cover(span);
        }
        true
    }

    fn quote(&mut self, i: usize, open: QuoteOpen) -> usize {
        self.flush_paragraph();
        let mut end = i;
        while self.lines.text(end + 1).is_some_and(BlockQuote::is_quote_line) {
            end += 1;
        }
        let mut body: Vec<String> = (i..=end)
            .filter_map(|n| self.lines.text(n))
            .map(|t| BlockQuote::strip(t, open.kind))
            .collect();

        let kind = match open.callout {
            Some(name) => {
                // the `[!name]` marker is consumed; a title after it stays
                let title = body
                    .first()
                    .and_then(|first| BlockQuote::callout_name(first))
                    .map(|(_, title)| title.to_string())
                    .unwrap_or_default();
                if title.is_empty() {
                    body.remove(0);
                } else {
                    body[0] = title;
                }
                BlockKind::Callout { name }
            }
            None => BlockKind::Quote { kind: open.kind },
        };
        self.emit(Block::new(kind, i, end, body.join("\n")));
        end + 1
    }

    /// Splits running text around `$…$` / `$$…$$` into paragraph text and
    /// `Math` blocks. Display math may span lines and runs to EOF when open.
    fn math(&mut self, i: usize, text: &str) -> usize {
        let mut line = i;
        let mut rest = text.to_string();
        loop {
            let Some(m) = Math::find(&rest) else {
                if !rest.trim().is_empty() {
                    self.extend_paragraph(line, &rest);
                }
                return line + 1;
            };
            let pre = &rest[..m.at];
            if !pre.trim().is_empty() {
                let pre = pre.to_string();
                self.extend_paragraph(line, &pre);
            }
            self.flush_paragraph();

            if let Some(close) = m.close {
                let content = rest[m.at + 1..close].trim().to_string();
                self.emit(Block::new(BlockKind::Math, line, line, content));
                rest = rest[close + 1..].to_string();
                continue;
            }

            let after = rest[m.at + Math::DISPLAY.len()..].to_string();
            if let Some(close) = Math::find_display_close(&after) {
                let content = after[..close].trim().to_string();
                self.emit(Block::new(BlockKind::Math, line, line, content));
                rest = after[close + Math::DISPLAY.len()..].to_string();
                continue;
            }

            let start = line;
            let mut parts = vec![after];
            loop {
                line += 1;
                let Some(t) = self.lines.text(line) else {
                    let content = parts.join("\n").trim().to_string();
                    let end = self.lines.last_index().max(start);
                    self.emit(Block::new(BlockKind::Math, start, end, content));
                    return line;
                };
                if let Some(close) = Math::find_display_close(t) {
                    parts.push(t[..close].to_string());
                    let content = parts.join("\n").trim().to_string();
                    self.emit(Block::new(BlockKind::Math, start, line, content));
                    rest = t[close + Math::DISPLAY.len()..].to_string();
                    break;
                }
                parts.push(t.to_string());
            }
        }
    }

    fn join_lines(&self, start: usize, end: usize) -> String {
        (start..=end)
            .filter_map(|n| self.lines.text(n))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn extend_paragraph(&mut self, line: usize, text: &str) {
        let text = text.trim_start().to_string();
        match &mut self.leaf {
            LeafState::Paragraph {
                end,
                lines,
                literal_tail,
                ..
            } => {
                *end = line;
                lines.push(text);
                *literal_tail = false;
            }
            LeafState::None => {
                self.leaf = LeafState::Paragraph {
                    start: line,
                    end: line,
                    lines: vec![text],
                    literal_tail: false,
                };
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if let LeafState::Paragraph {
            start,
            end,
            lines,
            literal_tail,
        } = std::mem::take(&mut self.leaf)
        {
            let joined = lines.join("\n");
            let (content, id) = if literal_tail {
                (joined.trim_end(), None)
            } else {
                Anchor::split_trailing(&joined)
            };
            let block = Block::new(BlockKind::Content, start, end, content).with_id(id);
            self.emit(block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::types::QuoteKind;
    use pretty_assertions::assert_eq;
    use xi_rope::Rope;

    fn segment(src: &str) -> Vec<Block> {
        let lines = SourceLines::from_rope(&Rope::from(src));
        BlockBuilder::new(&lines).build()
    }

    fn kinds(blocks: &[Block]) -> Vec<&'static str> {
        blocks.iter().map(Block::kind_name).collect()
    }

    #[test]
    fn paragraph_lines_join_with_newline() {
        let blocks = segment("first line\n  second line");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "first line\nsecond line");
        assert_eq!((blocks[0].line_start, blocks[0].line_end), (0, 1));
    }

    #[test]
    fn blank_lines_coalesce_into_one_break() {
        let blocks = segment("a\n\n\n\nb");
        assert_eq!(kinds(&blocks), vec!["content", "break", "content"]);
        assert_eq!(blocks[1].kind, BlockKind::Break { count: 3 });
        assert_eq!((blocks[1].line_start, blocks[1].line_end), (1, 3));
    }

    #[test]
    fn fence_swallows_other_constructs() {
        let blocks = segment("```md\n# not a heading\n- not a list\n```\nafter");
        assert_eq!(kinds(&blocks), vec!["code", "content"]);
        assert_eq!(blocks[0].content, "# not a heading\n- not a list\n");
        assert_eq!(blocks[0].line_end, 3);
    }

    #[test]
    fn heading_takes_trailing_anchor() {
        let blocks = segment("## Setup ^setup");
        assert_eq!(blocks[0].kind, BlockKind::Heading { level: 2 });
        assert_eq!(blocks[0].content, "Setup");
        assert_eq!(blocks[0].id.as_deref(), Some("setup"));
    }

    #[test]
    fn lists_split_on_ordering_change() {
        let blocks = segment("- a\n- b\n1. one\n2. two");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].content, "a\nb");
        assert_eq!(blocks[1].kind, BlockKind::List { ordered: true });
        assert_eq!(blocks[1].content, "one\ntwo");
        assert_eq!((blocks[1].line_start, blocks[1].line_end), (2, 3));
    }

    #[test]
    fn paragraph_between_items_splits_lists() {
        let blocks = segment("- a\ntext\n- b");
        assert_eq!(kinds(&blocks), vec!["list", "content", "list"]);
    }

    #[test]
    fn table_rows_are_fitted_to_divider() {
        let blocks = segment("| a | b |\n| --- | --- |\n| 1 |\n| 2 | 3 | 4 |\nafter");
        assert_eq!(kinds(&blocks), vec!["table", "content"]);
        let BlockKind::Table { body } = &blocks[0].kind else {
            panic!("expected table");
        };
        assert_eq!(
            body,
            &vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["1".to_string(), String::new()],
                vec!["2".to_string(), "3".to_string()],
            ]
        );
        assert_eq!(blocks[0].line_end, 3);
    }

    #[test]
    fn malformed_table_falls_back_to_paragraph() {
        let blocks = segment("| a | b |\n| --- | x |");
        assert_eq!(kinds(&blocks), vec!["content"]);
        assert_eq!(blocks[0].content, "| a | b |\n| --- | x |");
    }

    #[test]
    fn footnote_folds_continuation_lines() {
        let blocks = segment("[^n]: First\n  second\n  third\nnot part");
        assert_eq!(blocks[0].kind, BlockKind::Footnote { id: "n".into() });
        assert_eq!(blocks[0].content, "First\nsecond\nthird");
        assert_eq!(blocks[0].line_end, 2);
        assert_eq!(blocks[1].kind, BlockKind::Content);
    }

    #[test]
    fn standalone_anchor_skips_breaks() {
        let blocks = segment("para\n\n^para-id");
        assert_eq!(kinds(&blocks), vec!["content", "break"]);
        assert_eq!(blocks[0].id.as_deref(), Some("para-id"));
    }

    #[test]
    fn anchor_without_previous_block_is_text() {
        let blocks = segment("^lonely");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Content);
        assert_eq!(blocks[0].content, "^lonely");
        assert_eq!(blocks[0].id, None);

        let blocks = segment("^lonely\nnext line ^tail");
        assert_eq!(kinds(&blocks), vec!["content"]);
        assert_eq!(blocks[0].content, "^lonely\nnext line");
        assert_eq!(blocks[0].id.as_deref(), Some("tail"));
    }

    #[test]
    fn quote_runs_until_unprefixed_line() {
        let blocks = segment("> one\n> two\nthree");
        assert_eq!(
            blocks[0].kind,
            BlockKind::Quote {
                kind: QuoteKind::Blockquote
            }
        );
        assert_eq!(blocks[0].content, "one\ntwo");
        assert_eq!(blocks[1].content, "three");
    }

    #[test]
    fn pullquote_and_callout() {
        let blocks = segment(">> pulled\n> still pulled");
        assert_eq!(
            blocks[0].kind,
            BlockKind::Quote {
                kind: QuoteKind::Pullquote
            }
        );
        assert_eq!(blocks[0].content, "pulled\nstill pulled");

        let blocks = segment("> [!tip] Remember\n> body");
        assert_eq!(blocks[0].kind, BlockKind::Callout { name: "tip".into() });
        assert_eq!(blocks[0].content, "Remember\nbody");

        let blocks = segment("> [!note]\n> only body");
        assert_eq!(blocks[0].content, "only body");
    }

    #[test]
    fn inline_math_splits_the_paragraph() {
        let blocks = segment("before $x^2$ after");
        assert_eq!(kinds(&blocks), vec!["content", "math", "content"]);
        assert_eq!(blocks[0].content, "before");
        assert_eq!(blocks[1].content, "x^2");
        assert_eq!(blocks[2].content, "after");
    }

    #[test]
    fn display_math_spans_lines() {
        let blocks = segment("$$\na + b\n= c\n$$\ntail");
        assert_eq!(kinds(&blocks), vec!["math", "content"]);
        assert_eq!(blocks[0].content, "a + b\n= c");
        assert_eq!((blocks[0].line_start, blocks[0].line_end), (0, 3));
    }

    #[test]
    fn unterminated_display_math_runs_to_eof() {
        let blocks = segment("$$\nx\ny");
        assert_eq!(kinds(&blocks), vec!["math"]);
        assert_eq!(blocks[0].line_end, 2);
    }

    #[test]
    fn indented_lines_are_separate_code_blocks() {
        let blocks = segment("    let a = 1;\n\tlet b = 2;");
        assert_eq!(kinds(&blocks), vec!["indented-code", "indented-code"]);
        assert_eq!(blocks[1].content, "let b = 2;");
    }

    #[test]
    fn blocks_carry_source_spans() {
        let blocks = segment("# T\n\nbody");
        assert_eq!(blocks[0].span.start, 0);
        assert_eq!(blocks[2].span.end, 9);
    }
}
