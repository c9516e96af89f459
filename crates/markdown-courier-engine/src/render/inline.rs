use crate::parsing::blocks::kinds::{Anchor, BlockQuote, Heading, ListItem};
use crate::parsing::inline::kinds::{CodeSpan, Emphasis, InlineMath, Link};
use crate::parsing::inline::{Marker, Token};
use crate::resolve::{FootnoteTable, footnote_anchor, superscript};

use super::element::{Element, Node};

/// Element children and canonical markdown for one inline token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineOutput {
    pub nodes: Vec<Node>,
    pub markdown: String,
}

/// A run of paragraph content, or an image lifted out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Inline(Vec<Node>),
    Figure(Element),
}

/// Characters escaped wherever they appear in text.
const ALWAYS_ESCAPED: [char; 6] = [
    InlineMath::ESCAPE,
    Emphasis::STAR,
    Emphasis::UNDERSCORE,
    CodeSpan::TICK,
    InlineMath::DOLLAR,
    Link::OPEN,
];

/// Walks `tokens`, pairing emphasis markers by nearest open element.
///
/// Footnote references are numbered in `footnotes` as they are met. Text is
/// escaped so the markdown scans back to the same tokens.
pub fn render_tokens(tokens: &[Token], footnotes: &mut FootnoteTable) -> InlineOutput {
    let mut w = InlineWriter {
        stack: vec![(None, vec![])],
        markdown: String::new(),
    };
    let mut i = 0;
    while i < tokens.len() {
        if let Some(consumed) = w.close_and_reopen(&tokens[i..]) {
            i += consumed;
            continue;
        }
        match &tokens[i] {
            Token::Text(s) => {
                let line_start = w.markdown.is_empty() || w.markdown.ends_with('\n');
                let before_link = matches!(tokens.get(i + 1), Some(Token::Link { .. }));
                w.markdown.push_str(&escape_text(s, line_start, before_link));
                w.push(Node::text(s.as_str()));
            }
            tok @ (Token::Strong | Token::Em | Token::Strike | Token::Mark) => {
                if let Some(m) = tok.marker() {
                    w.marker(m);
                }
            }
            Token::Code(code) => {
                let fence = "`".repeat(longest_run(code, '`') + 1);
                w.markdown.push_str(&format!("{fence}{code}{fence}"));
                w.push(Element::new("code").text_child(code.as_str()).into());
            }
            Token::Math(tex) => {
                w.markdown.push_str(&format!("${tex}$"));
                w.push(Element::new("span").class("math").text_child(tex.as_str()).into());
            }
            Token::Link { url, text } => {
                let href = link_href(url);
                w.markdown.push_str(&format!("[{text}]({href})"));
                w.push(link_element(&href, text).into());
            }
            Token::Image {
                url,
                alt,
                caption,
                dimensions,
            } => {
                let src = url.replace(' ', "%20");
                let alt_md = match dimensions {
                    Some(d) => format!("{alt}|{}", d.to_suffix()),
                    None => alt.clone(),
                };
                w.markdown.push_str(&format!("![{alt_md}]({src}"));
                if let Some(cap) = caption {
                    let q = ['"', '\'', '`']
                        .into_iter()
                        .find(|q| !cap.contains(*q))
                        .unwrap_or('"');
                    w.markdown.push_str(&format!(" {q}{cap}{q}"));
                }
                w.markdown.push(')');
                let size = dimensions.map(|d| (d.width, d.height));
                w.push(Element::figure(&src, alt, caption.as_deref(), size).into());
            }
            Token::FootnoteRef { id } => {
                let n = footnotes.reference(id);
                w.markdown.push_str(&format!("[^{n}]"));
                let a = Element::new("a")
                    .class("footnote-ref")
                    .attr("href", format!("#{}", footnote_anchor(n)))
                    .text_child(superscript(n));
                w.push(a.into());
            }
            Token::Break => {
                w.markdown.push('\n');
                w.push(Element::new("br").into());
            }
        }
        i += 1;
    }
    w.finish()
}

struct InlineWriter {
    /// Open elements; the bottom entry is the root and has no marker.
    stack: Vec<(Option<Marker>, Vec<Node>)>,
    markdown: String,
}

impl InlineWriter {
    fn push(&mut self, node: Node) {
        if let Some((_, children)) = self.stack.last_mut() {
            children.push(node);
        }
    }

    fn marker(&mut self, m: Marker) {
        self.markdown.push_str(m.delimiter());
        match self.stack.iter().rposition(|(open, _)| *open == Some(m)) {
            Some(pos) => {
                while self.stack.len() > pos {
                    self.close_top();
                }
            }
            None => self.stack.push((Some(m), vec![])),
        }
    }

    /// Closing an outer marker while inner ones stay open arrives as
    /// `inner closes, outer, inner reopens`. Written out as the outer
    /// delimiter alone, it scans back to exactly that sequence.
    ///
    /// Returns how many tokens were consumed.
    fn close_and_reopen(&mut self, rest: &[Token]) -> Option<usize> {
        let markers: Vec<Marker> = rest.iter().map_while(Token::marker).collect();
        let open: Vec<Marker> = self.stack.iter().filter_map(|(m, _)| *m).collect();
        for k in 1..open.len() {
            let len = 2 * k + 1;
            if markers.len() < len {
                break;
            }
            let inner = &open[open.len() - k..];
            let outer = open[open.len() - k - 1];
            let matches = markers[..k].iter().eq(inner.iter().rev())
                && markers[k] == outer
                && markers[k + 1..len].iter().eq(inner.iter());
            if matches {
                self.markdown.push_str(outer.delimiter());
                for _ in 0..=k {
                    self.close_top();
                }
                for &m in inner {
                    self.stack.push((Some(m), vec![]));
                }
                return Some(len);
            }
        }
        None
    }

    fn close_top(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some((Some(m), children)) = self.stack.pop() {
            self.push(Element::new(m.tag()).with_children(children).into());
        }
    }

    fn finish(mut self) -> InlineOutput {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let nodes = self.stack.pop().map(|(_, n)| n).unwrap_or_default();
        InlineOutput {
            nodes,
            markdown: self.markdown,
        }
    }
}

/// Backslash-escapes `text` so it scans back as the same literal text.
///
/// `line_start` also escapes a block opener at the front; `before_link`
/// escapes a trailing `!` that would turn the following link into an image.
fn escape_text(text: &str, line_start: bool, before_link: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let opener = if line_start { block_opener(&chars) } else { None };
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let escape = match c {
            c if ALWAYS_ESCAPED.contains(&c) => true,
            // paired only in runs, which may continue into a neighbouring token
            Emphasis::STRIKE | Emphasis::MARK => {
                prev.is_none() || next.is_none() || prev == Some(c) || next == Some(c)
            }
            Link::IMAGE => before_link && next.is_none(),
            Anchor::PREFIX => prev.is_none_or(char::is_whitespace),
            _ => opener == Some(i),
        };
        if escape {
            out.push(InlineMath::ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Index of the character that would open a block at the start of a line.
fn block_opener(chars: &[char]) -> Option<usize> {
    match *chars.first()? {
        Heading::MARKER | BlockQuote::PREFIX => Some(0),
        c if ListItem::BULLETS.contains(&c) => Some(0),
        c if c.is_ascii_digit() => {
            let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
            (chars.get(digits) == Some(&ListItem::ORDINAL_SUFFIX)).then_some(digits)
        }
        _ => None,
    }
}

fn longest_run(s: &str, c: char) -> usize {
    s.split(|x: char| x != c).map(str::len).max().unwrap_or(0)
}

/// In-document `#` fragments use dashes for spaces; other urls are
/// percent-encoded for spaces only.
pub fn link_href(url: &str) -> String {
    if url.starts_with('#') {
        url.replace("%20", "-").replace(' ', "-")
    } else {
        url.replace(' ', "%20")
    }
}

fn link_element(href: &str, text: &str) -> Element {
    let target = if href.starts_with("http") { "_blank" } else { "_self" };
    Element::new("a")
        .attr("href", href)
        .attr("target", target)
        .text_child(text)
}

/// Splits top-level nodes at every image figure.
///
/// Runs made only of whitespace and line breaks are dropped.
pub fn separate_images(nodes: Vec<Node>) -> Vec<Segment> {
    let mut out = vec![];
    let mut run: Vec<Node> = vec![];
    for node in nodes {
        match node {
            Node::Element(e) if e.tag == "figure" => {
                flush_run(&mut run, &mut out);
                out.push(Segment::Figure(e));
            }
            other => run.push(other),
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Segment>) {
    let blank = run.iter().all(|n| match n {
        Node::Text(s) => s.trim().is_empty(),
        Node::Element(e) => e.tag == "br",
    });
    let nodes = std::mem::take(run);
    if !blank {
        out.push(Segment::Inline(trim_breaks(nodes)));
    }
}

/// Drops `br` elements at either end of a run.
fn trim_breaks(mut nodes: Vec<Node>) -> Vec<Node> {
    let is_br = |n: &Node| n.as_element().is_some_and(|e| e.tag == "br");
    while nodes.first().is_some_and(is_br) {
        nodes.remove(0);
    }
    while nodes.last().is_some_and(is_br) {
        nodes.pop();
    }
    nodes
}
