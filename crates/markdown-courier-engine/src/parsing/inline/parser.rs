use super::{
    cursor::Cursor,
    emphasis::OpenStack,
    kinds::{CodeSpan, Emphasis, InlineMath, Link, WikiLink},
    types::{Dimensions, Marker, Token},
};

/// Scans one block's content into inline tokens.
///
/// Lines are scanned independently and separated by [`Token::Break`] (none
/// after the last line). With `in_code` set, each line is a single literal
/// [`Token::Text`].
///
/// Every paired marker opened on a line is closed on that line: whatever is
/// still open at the end of the line is closed innermost first.
pub fn tokenize_block(s: &str, in_code: bool) -> Vec<Token> {
    let lines: Vec<&str> = s.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    let mut out = vec![];
    for (n, line) in lines.iter().enumerate() {
        if in_code {
            if !line.is_empty() {
                out.push(Token::text(*line));
            }
        } else {
            out.extend(tokenize_line(line));
        }
        if n < last {
            out.push(Token::Break);
        }
    }
    out
}

/// Scans a single line.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let mut sc = Scanner::new(line);
    sc.run();
    sc.finish()
}

struct Scanner<'a> {
    cur: Cursor<'a>,
    buf: String,
    out: Vec<Token>,
    stack: OpenStack,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            cur: Cursor::new(line),
            buf: String::new(),
            out: vec![],
            stack: OpenStack::default(),
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.cur.peek() {
            match c {
                InlineMath::ESCAPE => self.escape(),
                Emphasis::STAR | Emphasis::UNDERSCORE => self.emphasis_run(c),
                Emphasis::STRIKE => self.pair_run(c, Marker::Strike),
                Emphasis::MARK => self.pair_run(c, Marker::Mark),
                CodeSpan::TICK => self.code_span(),
                InlineMath::DOLLAR => self.math(),
                Link::IMAGE if self.cur.peek_nth(1) == Some(Link::OPEN) => {
                    self.cur.bump();
                    self.bracket(true);
                }
                Link::OPEN => self.bracket(false),
                _ => {
                    self.cur.bump();
                    self.buf.push(c);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_text();
        self.stack.flush(&mut self.out);
        self.out
    }

    fn flush_text(&mut self) {
        if !self.buf.is_empty() {
            self.out.push(Token::Text(std::mem::take(&mut self.buf)));
        }
    }

    fn push(&mut self, tok: Token) {
        self.flush_text();
        self.out.push(tok);
    }

    fn literal(&mut self, c: char, n: usize) {
        for _ in 0..n {
            self.buf.push(c);
        }
    }

    fn escape(&mut self) {
        self.cur.bump();
        match self.cur.bump() {
            Some(c) => self.buf.push(c),
            None => self.buf.push(InlineMath::ESCAPE),
        }
    }

    /// Tries to toggle `m`; on refusal the marker characters stay literal.
    fn toggle(&mut self, m: Marker, c: char, width: usize, can_open: bool, can_close: bool) {
        let mut emitted = vec![];
        if self.stack.toggle(m, can_open, can_close, &mut emitted) {
            self.flush_text();
            self.out.extend(emitted);
        } else {
            self.literal(c, width);
        }
    }

    /// `*` / `_` runs, split by [`Emphasis::groups`].
    ///
    /// Opening needs a non-space after the run, closing a non-space before
    /// it. Inside a run the neighbouring markers count as non-space.
    fn emphasis_run(&mut self, c: char) {
        let n = self.cur.run_len(c);
        let prev = self.cur.prev();
        let after = self.cur.rest()[n..].chars().next();
        self.cur.bump_n(n);

        let groups = Emphasis::groups(n);
        let used: usize = groups.iter().sum();
        let last = groups.len().saturating_sub(1);
        for (k, g) in groups.into_iter().enumerate() {
            let can_close = k > 0 || prev.is_some_and(|p| !p.is_whitespace());
            let can_open = k < last || after.is_some_and(|a| !a.is_whitespace());
            for m in self.group_order(g) {
                let width = if m == Marker::Strong { 2 } else { 1 };
                self.toggle(m, c, width, can_open, can_close);
            }
        }
        self.literal(c, n - used);
    }

    fn group_order(&self, g: usize) -> Vec<Marker> {
        match g {
            1 => vec![Marker::Em],
            2 => vec![Marker::Strong],
            _ => {
                let both = self.stack.is_open(Marker::Strong) && self.stack.is_open(Marker::Em);
                if both {
                    match self.stack.innermost(Marker::Strong, Marker::Em) {
                        Some(Marker::Em) => vec![Marker::Em, Marker::Strong],
                        _ => vec![Marker::Strong, Marker::Em],
                    }
                } else if self.stack.is_open(Marker::Em) {
                    vec![Marker::Em, Marker::Strong]
                } else {
                    vec![Marker::Strong, Marker::Em]
                }
            }
        }
    }

    /// `~~` and `==`: one toggle per run of two or more, single chars are text.
    fn pair_run(&mut self, c: char, m: Marker) {
        let n = self.cur.run_len(c);
        if n < 2 {
            self.cur.bump();
            self.buf.push(c);
            return;
        }
        let after = self.cur.rest()[n..].chars().next();
        self.cur.bump_n(n);
        let can_open = after.is_some_and(|a| !a.is_whitespace());
        let mut emitted = vec![];
        if self.stack.toggle(m, can_open, true, &mut emitted) {
            self.flush_text();
            self.out.extend(emitted);
            self.literal(c, n - 2);
        } else {
            self.literal(c, n);
        }
    }

    fn code_span(&mut self) {
        let n = self.cur.run_len(CodeSpan::TICK);
        let rest = &self.cur.rest()[n..];
        match CodeSpan::find_close(rest, n) {
            Some(end) => {
                self.push(Token::Code(rest[..end].to_string()));
                self.cur.bump_n(n + end + n);
            }
            None => {
                self.literal(CodeSpan::TICK, n);
                self.cur.bump_n(n);
            }
        }
    }

    fn math(&mut self) {
        if self.cur.starts_with(InlineMath::DISPLAY) {
            let d = InlineMath::DISPLAY.len();
            let rest = &self.cur.rest()[d..];
            match rest.find(InlineMath::DISPLAY) {
                Some(end) if !rest[..end].trim().is_empty() => {
                    self.push(Token::Math(rest[..end].trim().to_string()));
                    self.cur.bump_n(d + end + d);
                }
                _ => {
                    self.buf.push_str(InlineMath::DISPLAY);
                    self.cur.bump_n(d);
                }
            }
            return;
        }
        let rest = &self.cur.rest()[1..];
        match InlineMath::find_close(rest) {
            Some(end) if end > 0 => {
                self.push(Token::Math(rest[..end].to_string()));
                self.cur.bump_n(end + 2);
            }
            _ => {
                self.cur.bump();
                self.buf.push(InlineMath::DOLLAR);
            }
        }
    }

    /// Everything starting with `[`: wiki links, footnote references and
    /// `[text](target)`. `image` means a `!` was already consumed.
    ///
    /// A construct missing its closing delimiter leaves its opening
    /// characters as literal text and scanning resumes after them.
    fn bracket(&mut self, image: bool) {
        let rest = self.cur.rest();
        let prefix = if image { "!" } else { "" };

        if let Some(after_open) = rest.strip_prefix(WikiLink::OPEN) {
            match after_open.find(WikiLink::CLOSE) {
                Some(end) => {
                    self.push(wiki_token(&after_open[..end], image));
                    self.cur.bump_n(WikiLink::OPEN.len() + end + WikiLink::CLOSE.len());
                }
                None => {
                    self.buf.push_str(prefix);
                    self.buf.push_str(WikiLink::OPEN);
                    self.cur.bump_n(WikiLink::OPEN.len());
                }
            }
            return;
        }

        if !image {
            if let Some(after_open) = rest.strip_prefix(Link::FOOTNOTE) {
                match after_open.find(Link::CLOSE) {
                    Some(end) if is_footnote_id(&after_open[..end]) => {
                        let id = after_open[..end].to_string();
                        self.push(Token::FootnoteRef { id });
                        self.cur.bump_n(Link::FOOTNOTE.len() + end + 1);
                    }
                    _ => {
                        self.buf.push_str(Link::FOOTNOTE);
                        self.cur.bump_n(Link::FOOTNOTE.len());
                    }
                }
                return;
            }
        }

        let Some(close) = rest.find(Link::CLOSE) else {
            return self.bracket_literal(prefix);
        };
        let text = &rest[1..close];
        let after = &rest[close + 1..];
        if !after.starts_with(Link::URL_OPEN) {
            return self.bracket_literal(prefix);
        }
        let Some(end) = after.find(Link::URL_CLOSE) else {
            // `[text](` stays literal
            self.buf.push_str(prefix);
            self.buf.push_str(&rest[..close + 2]);
            self.cur.bump_n(close + 2);
            return;
        };

        let (url, caption) = Link::split_target(&after[1..end]);
        let tok = if image {
            let (alt, dimensions) = split_alt(text);
            Token::Image {
                url: url.to_string(),
                alt: alt.to_string(),
                caption: caption.map(str::to_string),
                dimensions,
            }
        } else {
            Token::Link {
                url: url.to_string(),
                text: text.to_string(),
            }
        };
        self.push(tok);
        self.cur.bump_n(close + 1 + end + 1);
    }

    fn bracket_literal(&mut self, prefix: &str) {
        self.buf.push_str(prefix);
        self.buf.push(Link::OPEN);
        self.cur.bump();
    }
}

fn is_footnote_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(char::is_whitespace)
}

/// `alt|WxH` → alt text plus dimensions; a suffix that is not a size stays in the alt.
fn split_alt(alt: &str) -> (&str, Option<Dimensions>) {
    if let Some((text, suffix)) = alt.rsplit_once(WikiLink::ALIAS) {
        if let Some(d) = Dimensions::parse(suffix) {
            return (text.trim(), Some(d));
        }
    }
    (alt, None)
}

fn wiki_token(inner: &str, image: bool) -> Token {
    let (target, suffix) = WikiLink::split(inner);
    let dimensions = suffix.and_then(Dimensions::parse);
    if image {
        return Token::Image {
            url: target.to_string(),
            alt: target.to_string(),
            caption: None,
            dimensions,
        };
    }
    let text = match suffix {
        Some(alias) if dimensions.is_none() && !alias.is_empty() => alias,
        _ => target,
    };
    Token::Link {
        url: target.to_string(),
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use Token::{Break, Em, Mark, Strike, Strong};

    fn t(s: &str) -> Token {
        Token::text(s)
    }

    #[test]
    fn bold_with_nested_italic() {
        assert_eq!(
            tokenize_block("**bold *and italic* text**", false),
            vec![Strong, t("bold "), Em, t("and italic"), Em, t(" text"), Strong]
        );
    }

    #[test]
    fn interleaved_italic_and_bold_close_and_reopen() {
        assert_eq!(
            tokenize_block("*a **b* c**", false),
            vec![Em, t("a "), Strong, t("b"), Strong, Em, Strong, t(" c"), Strong]
        );
    }

    #[test]
    fn interleaved_strike_and_mark() {
        assert_eq!(
            tokenize_block("~~a ==b~~ c==", false),
            vec![Strike, t("a "), Mark, t("b"), Mark, Strike, Mark, t(" c"), Mark]
        );
    }

    #[test]
    fn bold_italic_triple_run() {
        assert_eq!(
            tokenize_block("***both***", false),
            vec![Strong, Em, t("both"), Em, Strong]
        );
    }

    #[test]
    fn triple_run_closes_whichever_is_innermost() {
        assert_eq!(
            tokenize_block("*it **bold***", false),
            vec![Em, t("it "), Strong, t("bold"), Strong, Em]
        );
        assert_eq!(
            tokenize_block("**bold *it***", false),
            vec![Strong, t("bold "), Em, t("it"), Em, Strong]
        );
    }

    #[rstest]
    #[case("*******", vec![Strong, Em, Em, t("***"), Strong])]
    #[case("*******a", vec![Strong, Em, Em, t("***a"), Strong])]
    #[case("******a******", vec![Strong, Em, Em, Strong, t("a"), Strong, Em, Em, Strong])]
    fn long_runs_toggle_primary_then_extra(#[case] s: &str, #[case] expected: Vec<Token>) {
        assert_eq!(tokenize_block(s, false), expected);
    }

    #[rstest]
    #[case("a * b * c")]
    #[case("2 * 3 = 6")]
    #[case("a ~ b")]
    #[case("x = y")]
    #[case("a == b")]
    fn stray_markers_stay_literal(#[case] s: &str) {
        assert_eq!(tokenize_block(s, false), vec![t(s)]);
    }

    #[test]
    fn unclosed_markers_close_at_end_of_line() {
        assert_eq!(
            tokenize_block("**open\nnext", false),
            vec![Strong, t("open"), Strong, Break, t("next")]
        );
    }

    #[test]
    fn underscore_emphasis() {
        assert_eq!(
            tokenize_block("__strong__ and _em_", false),
            vec![Strong, t("strong"), Strong, t(" and "), Em, t("em"), Em]
        );
    }

    #[test]
    fn code_span_is_raw() {
        assert_eq!(
            tokenize_block("`[[not a link]]` and ``a ` b``", false),
            vec![
                Token::Code("[[not a link]]".into()),
                t(" and "),
                Token::Code("a ` b".into())
            ]
        );
    }

    #[test]
    fn unclosed_constructs_become_text() {
        let s = "[[unclosed and `also unclosed";
        assert_eq!(tokenize_block(s, false), vec![t(s)]);
    }

    #[rstest]
    #[case("$x^2$", vec![Token::Math("x^2".into())])]
    #[case("$$E = mc^2$$", vec![Token::Math("E = mc^2".into())])]
    #[case("costs $5", vec![t("costs $5")])]
    #[case("$$ open", vec![t("$$ open")])]
    fn inline_math(#[case] s: &str, #[case] expected: Vec<Token>) {
        assert_eq!(tokenize_block(s, false), expected);
    }

    #[test]
    fn escapes_are_literal() {
        assert_eq!(tokenize_block(r"\*not em\* \[x] end\", false), vec![t(r"*not em* [x] end\")]);
    }

    #[test]
    fn markdown_link_and_image() {
        assert_eq!(
            tokenize_block("see [site](https://a.b) ![cap|300](img.png \"Caption\")", false),
            vec![
                t("see "),
                Token::Link {
                    url: "https://a.b".into(),
                    text: "site".into()
                },
                t(" "),
                Token::Image {
                    url: "img.png".into(),
                    alt: "cap".into(),
                    caption: Some("Caption".into()),
                    dimensions: Some(Dimensions {
                        width: 300,
                        height: None
                    }),
                },
            ]
        );
    }

    #[test]
    fn wiki_links_and_images() {
        assert_eq!(
            tokenize_block("[[Page|Alias]] [[Other]] ![[pic.png|300x200]]", false),
            vec![
                Token::Link {
                    url: "Page".into(),
                    text: "Alias".into()
                },
                t(" "),
                Token::Link {
                    url: "Other".into(),
                    text: "Other".into()
                },
                t(" "),
                Token::Image {
                    url: "pic.png".into(),
                    alt: "pic.png".into(),
                    caption: None,
                    dimensions: Some(Dimensions {
                        width: 300,
                        height: Some(200)
                    }),
                },
            ]
        );
    }

    #[rstest]
    #[case("[text] plain", vec![t("[text] plain")])]
    #[case("[text](unclosed", vec![t("[text](unclosed")])]
    #[case("![alt] x", vec![t("![alt] x")])]
    #[case("[^open", vec![t("[^open")])]
    fn broken_brackets_degrade_to_text(#[case] s: &str, #[case] expected: Vec<Token>) {
        assert_eq!(tokenize_block(s, false), expected);
    }

    #[test]
    fn footnote_reference() {
        assert_eq!(
            tokenize_block("See [^1].", false),
            vec![t("See "), Token::FootnoteRef { id: "1".into() }, t(".")]
        );
    }

    #[test]
    fn code_mode_keeps_lines_literal() {
        assert_eq!(
            tokenize_block("x *y*\n\nz", true),
            vec![t("x *y*"), Break, Break, t("z")]
        );
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert_eq!(tokenize_block("", false), vec![]);
    }
}
