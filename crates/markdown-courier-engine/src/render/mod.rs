//! # Renderer
//!
//! Walks segmented [`Block`]s and emits two parallel artifacts: an owned
//! element tree for display and a canonical markdown string that segments
//! back into the same blocks.
//!
//! ## Modules
//!
//! - **`element`**: `Element` / `Node` tree and HTML serialization
//! - **`inline`**: token walk producing element children plus markdown
//! - **`language`**: code-language aliases and the native whitelist
//! - **`table`**: pipe-table markdown and `table` elements
//! - **`raster`**: rasterizer and host-buffer collaborators
//! - **`settings`**: `RenderSettings`
//! - **`diagnostic`**: per-block problems reported on the output
//!
//! ## Key Invariants
//!
//! - Blocks render in document order; a block that fails to rasterize is
//!   either rendered natively or omitted, never aborts the render.
//! - Footnote numbers come from the order of references; definitions are
//!   rendered after all blocks, ascending by number.
//! - Only headings register with the outline; the extracted title does not.

pub mod diagnostic;
pub mod element;
pub mod inline;
pub mod language;
pub mod raster;
pub mod settings;
pub mod table;

use std::collections::HashMap;

use serde::Serialize;

use crate::parsing::blocks::{Block, BlockKind, QuoteKind};
use crate::parsing::inline::{Token, tokenize_block, tokenize_line};
use crate::resolve::{FootnoteTable, Toc, TocBuilder, footnote_anchor, slugify};

pub use diagnostic::{RenderDiagnostic, Severity};
pub use element::{Element, Node};
pub use inline::{InlineOutput, Segment, render_tokens, separate_images};
pub use raster::{
    HostBuffer, ImageRasterizer, MemoryBuffer, NoRasterizer, RasterError, RasterRequest,
    RasterizedImage,
};
pub use settings::{PngConversion, RenderSettings, Theme, TocStyle};

/// The first image of a document, when nothing precedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainImage {
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
}

/// Metadata split out for publishing adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentParts {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub main_image: Option<MainImage>,
    /// Canonical markdown after the title and subtitle.
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderOutput {
    /// `article` element holding every rendered block.
    pub element_tree: Element,
    pub canonical_markdown: String,
    pub toc: Toc,
    pub toc_markdown: Option<String>,
    pub toc_element: Option<Element>,
    pub parts: DocumentParts,
    pub diagnostics: Vec<RenderDiagnostic>,
    pub footnotes: FootnoteTable,
}

impl RenderOutput {
    /// Canonical markdown, prefixed by the table of contents when one was built.
    pub fn raw_markdown(&self) -> String {
        match &self.toc_markdown {
            Some(toc) => format!("{toc}\n{}", self.canonical_markdown),
            None => self.canonical_markdown.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        self.element_tree.to_html()
    }
}

const BREAK_CLASS: &str = "obsidian-break";
const LINK_BLOCK_CLASS: &str = "link-block";

/// One render pass over one document.
///
/// Holds the collaborator handles for the duration of the pass; the host
/// buffer is only touched around rasterization calls.
pub struct Renderer<'a> {
    settings: &'a RenderSettings,
    rasterizer: &'a dyn ImageRasterizer,
    host: &'a mut dyn HostBuffer,

    nodes: Vec<Node>,
    markdown: String,
    footnotes: FootnoteTable,
    toc: TocBuilder,
    parts: DocumentParts,
    diagnostics: Vec<RenderDiagnostic>,
    /// Set once any block other than breaks, title and subtitle is rendered.
    seen_body: bool,
    /// The block being rendered was taken as title or subtitle.
    title_part: bool,
    /// Markdown offset where `DocumentParts::content` starts.
    body_start: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(
        settings: &'a RenderSettings,
        rasterizer: &'a dyn ImageRasterizer,
        host: &'a mut dyn HostBuffer,
    ) -> Self {
        Self {
            settings,
            rasterizer,
            host,
            nodes: vec![],
            markdown: String::new(),
            footnotes: FootnoteTable::default(),
            toc: TocBuilder::default(),
            parts: DocumentParts::default(),
            diagnostics: vec![],
            seen_body: false,
            title_part: false,
            body_start: 0,
        }
    }

    pub async fn render(mut self, blocks: &[Block]) -> RenderOutput {
        let mut definitions: HashMap<&str, &Block> = HashMap::new();
        for b in blocks {
            if let BlockKind::Footnote { id } = &b.kind {
                definitions.entry(id.as_str()).or_insert(b);
            }
        }

        let mut leading = true;
        for b in blocks {
            if leading && self.settings.ignore_leading_breaks && b.is_break() {
                continue;
            }
            leading = false;
            self.block(b).await;
        }
        self.footnote_section(&definitions);

        let toc = std::mem::take(&mut self.toc).finish();
        let mut element_tree = Element::new("article").with_children(self.nodes);
        rewrite_fragments(&mut element_tree, &toc);

        let (toc_markdown, toc_element) = if self.settings.create_toc && !toc.is_empty() {
            (
                Some(toc.to_markdown(self.settings.toc_style)),
                Some(toc.to_element(self.settings.toc_style)),
            )
        } else {
            (None, None)
        };

        let mut parts = self.parts;
        parts.content = self
            .markdown
            .get(self.body_start..)
            .unwrap_or_default()
            .trim_start_matches('\n')
            .to_string();

        RenderOutput {
            element_tree,
            canonical_markdown: self.markdown,
            toc,
            toc_markdown,
            toc_element,
            parts,
            diagnostics: self.diagnostics,
            footnotes: self.footnotes,
        }
    }

    async fn block(&mut self, b: &Block) {
        if !matches!(b.kind, BlockKind::Heading { .. } | BlockKind::Footnote { .. }) {
            if let Some(id) = &b.id {
                self.anchor_before(id);
            }
        }

        match &b.kind {
            BlockKind::Break { count } => self.breaks(*count),
            BlockKind::Heading { level } => self.heading(b, *level),
            BlockKind::Content => self.content(b),
            BlockKind::List { ordered } => self.list(b, *ordered),
            BlockKind::Quote { kind } => self.quote(b, *kind),
            BlockKind::Footnote { .. } => {}
            BlockKind::HorizontalRule => {
                self.nodes.push(Element::new("hr").into());
                self.markdown.push_str("---\n");
            }
            BlockKind::Code => {
                let code = Element::new("code").text_child(b.content.as_str());
                self.nodes.push(Element::new("pre").child(code).into());
                self.markdown.push_str(&format!("\t{}\n", b.content));
            }
            BlockKind::CodeBlock {
                language,
                caption,
                to_png,
                use_light_theme,
            } => {
                self.code_block(b, language, caption.as_deref(), *to_png, *use_light_theme)
                    .await
            }
            BlockKind::Table { body } => self.table(b, body).await,
            BlockKind::Callout { name } => self.callout(b, name).await,
            BlockKind::Math => self.math(b).await,
        }

        if !matches!(b.kind, BlockKind::Break { .. } | BlockKind::Footnote { .. }) {
            if !std::mem::take(&mut self.title_part) {
                self.seen_body = true;
            }
            if let Some(id) = &b.id {
                if !matches!(b.kind, BlockKind::Heading { .. }) {
                    self.markdown.push_str(&format!("^{id}\n"));
                }
            }
        }
    }

    fn inline(&mut self, tokens: &[Token]) -> InlineOutput {
        render_tokens(tokens, &mut self.footnotes)
    }

    /// Turns a preceding hidden break into the anchor, or adds a hidden one.
    fn anchor_before(&mut self, id: &str) {
        match self.nodes.last_mut() {
            Some(Node::Element(p)) if p.has_class(BREAK_CLASS) => {
                p.set_attr("class", LINK_BLOCK_CLASS);
                p.set_attr("name", id);
            }
            _ => self
                .nodes
                .push(Element::hidden_paragraph(Some(id)).class(LINK_BLOCK_CLASS).into()),
        }
    }

    /// A run of `count` blank lines; every second one leaves a hidden
    /// paragraph that a following anchor can claim.
    fn breaks(&mut self, count: usize) {
        for i in 1..=count {
            if i % 2 == 0 {
                self.nodes
                    .push(Element::hidden_paragraph(None).class(BREAK_CLASS).into());
            }
            self.markdown.push('\n');
        }
    }

    fn heading(&mut self, b: &Block, level: u8) {
        let out = self.inline(&tokenize_line(&b.content));
        let text = Element::new("span").with_children(out.nodes.clone()).text_content();

        let extract = self.settings.extract_title && !self.seen_body;
        let id = if extract && level == 1 && self.parts.title.is_none() {
            self.parts.title = Some(text.clone());
            self.title_part = true;
            b.id.clone().unwrap_or_else(|| slugify(&text))
        } else {
            if extract && self.parts.title.is_some() && self.parts.subtitle.is_none() {
                self.parts.subtitle = Some(text.clone());
                self.title_part = true;
            }
            self.toc.push(level, &text, b.id.as_deref()).anchor
        };

        let h = Element::new(format!("h{level}"))
            .attr("id", id.as_str())
            .attr("name", id.as_str())
            .with_children(out.nodes);
        self.nodes.push(h.into());

        self.markdown.push_str(&"#".repeat(usize::from(level)));
        self.markdown.push(' ');
        self.markdown.push_str(&out.markdown);
        if let Some(explicit) = &b.id {
            self.markdown.push_str(&format!(" ^{explicit}"));
        }
        self.markdown.push('\n');
        if self.title_part {
            self.body_start = self.markdown.len();
        }
    }

    fn content(&mut self, b: &Block) {
        let tokens = tokenize_block(&b.content, false);
        let out = self.inline(&tokens);
        let segments = separate_images(out.nodes);

        if !self.seen_body {
            if let Some(Segment::Figure(_)) = segments.first() {
                if self.parts.main_image.is_none() {
                    self.parts.main_image = first_image(&tokens);
                }
            } else if self.settings.extract_title
                && self.parts.title.is_some()
                && self.parts.subtitle.is_none()
            {
                self.parts.subtitle = Some(tokens.iter().map(token_text).collect());
                self.title_part = true;
            }
        }

        self.push_segments(segments);
        if !out.markdown.is_empty() {
            self.markdown.push_str(&out.markdown);
            self.markdown.push('\n');
        }
        if self.title_part {
            self.body_start = self.markdown.len();
        }
    }

    fn push_segments(&mut self, segments: Vec<Segment>) {
        for seg in segments {
            match seg {
                Segment::Inline(nodes) => self.nodes.push(Element::new("p").with_children(nodes).into()),
                Segment::Figure(f) => self.nodes.push(f.into()),
            }
        }
    }

    fn list(&mut self, b: &Block, ordered: bool) {
        let mut list = Element::new(if ordered { "ol" } else { "ul" });
        for (n, item) in b.content.split('\n').enumerate() {
            let out = self.inline(&tokenize_line(item));
            list = list.child(Element::new("li").with_children(out.nodes));
            if ordered {
                self.markdown.push_str(&format!("{}. ", n + 1));
            } else {
                self.markdown.push_str("- ");
            }
            self.markdown.push_str(&out.markdown);
            self.markdown.push('\n');
        }
        self.nodes.push(list.into());
    }

    fn quote(&mut self, b: &Block, kind: QuoteKind) {
        let out = self.inline(&tokenize_block(&b.content, false));
        let mut q = Element::new("blockquote");
        let prefix = match kind {
            QuoteKind::Blockquote => "> ",
            QuoteKind::Pullquote => {
                q = q.class("pullquote");
                ">> "
            }
        };
        self.nodes
            .push(q.child(Element::new("p").with_children(out.nodes)).into());
        for line in out.markdown.split('\n') {
            self.markdown.push_str(prefix);
            self.markdown.push_str(line);
            self.markdown.push('\n');
        }
    }

    fn footnote_section(&mut self, definitions: &HashMap<&str, &Block>) {
        let mut section = vec![];
        let mut md = String::new();
        let mut n = 1;
        // bodies may reference further footnotes, growing the table as we go
        while n <= self.footnotes.len() {
            let Some(id) = self.footnotes.id_for(n).map(str::to_string) else {
                break;
            };
            match definitions.get(id.as_str()) {
                Some(def) => {
                    let out = self.inline(&tokenize_block(&def.content, false));
                    let p = Element::new("p")
                        .class("footnote")
                        .attr("id", footnote_anchor(n))
                        .text_child(format!("{n}. "))
                        .with_children(out.nodes);
                    section.push(Node::from(p));
                    md.push_str(&format!("[^{n}]: {}\n", out.markdown.replace('\n', "\n  ")));
                }
                None => log::warn!("footnote [^{id}] is referenced but never defined"),
            }
            n += 1;
        }
        if section.is_empty() {
            return;
        }
        self.nodes.push(Element::new("hr").into());
        self.nodes.extend(section);
        if !self.markdown.is_empty() && !self.markdown.ends_with("\n\n") {
            self.markdown.push('\n');
        }
        self.markdown.push_str(&md);
    }

    async fn code_block(
        &mut self,
        b: &Block,
        language: &str,
        caption: Option<&str>,
        to_png: bool,
        use_light_theme: bool,
    ) {
        let normalized = language::normalize_language(language);
        let shown_caption = caption.map(str::to_string).or_else(|| {
            (self.settings.caption_from_language && !language.is_empty()).then(|| language.to_string())
        });

        let body = b.content.trim_end_matches('\n');
        let mut code = Element::new("code");
        if language.is_empty() {
            let out = self.inline(&tokenize_block(body, false));
            code = code.with_children(out.nodes);
        } else {
            code = code.text_child(body);
        }
        let mut pre = Element::new("pre");
        if !normalized.is_empty() {
            pre = pre.attr("data-code-block-lang", normalized.as_str());
        }
        pre = pre.child(code);
        let native = match &shown_caption {
            Some(cap) => Element::new("figure").child(pre).child(
                Element::new("figcaption")
                    .class("imageCaption")
                    .text_child(cap.as_str()),
            ),
            None => pre,
        };

        let fence = "`".repeat(fence_len(&b.content));
        let mut md = format!("{fence}{language}");
        if to_png {
            md.push('!');
        }
        if use_light_theme {
            md.push('*');
        }
        if let Some(cap) = caption {
            md.push(' ');
            md.push_str(cap);
        }
        md.push('\n');
        md.push_str(&b.content);
        md.push_str(&fence);
        md.push('\n');

        if language::wants_png(&normalized, self.settings.png.code, to_png) {
            let theme = if use_light_theme {
                self.settings.theme.inverted()
            } else {
                self.settings.theme
            };
            self.widget(b, "code", native, md, shown_caption.as_deref(), theme)
                .await;
        } else {
            self.nodes.push(native.into());
            self.markdown.push_str(&md);
        }
    }

    async fn table(&mut self, b: &Block, body: &[Vec<String>]) {
        let md_rows: Vec<Vec<String>> = body
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| self.inline(&tokenize_line(cell)).markdown)
                    .collect()
            })
            .collect();
        let md = table::markdown_table(&md_rows);
        let native = table::table_element(body, |tag, text| {
            let out = render_tokens(&tokenize_line(text), &mut self.footnotes);
            Element::new(tag).with_children(out.nodes)
        });

        if self.settings.png.table {
            self.widget(b, "table", native, md, None, self.settings.theme)
                .await;
        } else {
            self.nodes.push(native.into());
            self.markdown.push_str(&md);
        }
    }

    async fn callout(&mut self, b: &Block, name: &str) {
        let (title, rest) = b.content.split_once('\n').unwrap_or((b.content.as_str(), ""));
        let title_out = self.inline(&tokenize_line(title));
        let mut el = Element::new("blockquote")
            .class("callout")
            .attr("data-callout", name)
            .child(
                Element::new("p")
                    .class("callout-title")
                    .with_children(title_out.nodes),
            );
        let mut md = format!("> [!{name}] {}\n", title_out.markdown);
        if !rest.is_empty() {
            let out = self.inline(&tokenize_block(rest, false));
            el = el.child(Element::new("p").with_children(out.nodes));
            for line in out.markdown.split('\n') {
                md.push_str(&format!("> {line}\n"));
            }
        }

        if self.settings.png.callout {
            self.widget(b, "callout", el, md, None, self.settings.theme)
                .await;
        } else {
            self.nodes.push(el.into());
            self.markdown.push_str(&md);
        }
    }

    async fn math(&mut self, b: &Block) {
        let native = Element::new("pre")
            .class("math")
            .child(Element::new("code").text_child(b.content.as_str()));
        let md = format!("$$\n{}\n$$\n", b.content);
        if self.settings.png.math {
            self.widget(b, "math", native, md, None, self.settings.theme)
                .await;
        } else {
            self.nodes.push(native.into());
            self.markdown.push_str(&md);
        }
    }

    /// Rasterizes `native`, falling back to it (or omitting the block) on failure.
    ///
    /// The canonical markdown keeps the native form when rasterization fails.
    async fn widget(
        &mut self,
        b: &Block,
        kind: &'static str,
        native: Element,
        native_md: String,
        caption: Option<&str>,
        theme: Theme,
    ) {
        log::debug!("rasterizing {kind} block at lines {}-{}", b.line_start, b.line_end);
        match self.rasterize(b, kind, &native, theme).await {
            Ok((path, img)) => {
                let alt = format!("{kind} widget");
                let fig = Element::figure(&path, &alt, caption, Some((img.width, Some(img.height))));
                self.nodes.push(fig.into());
                self.markdown
                    .push_str(&format!("![{alt}|{}x{}]({path}", img.width, img.height));
                if let Some(cap) = caption {
                    self.markdown.push_str(&format!(" \"{cap}\""));
                }
                self.markdown.push_str(")\n");
            }
            Err(err) if self.settings.native_fallback => {
                log::warn!(
                    "rendering {kind} block at lines {}-{} natively: {err}",
                    b.line_start,
                    b.line_end
                );
                self.diagnostics.push(RenderDiagnostic::new(
                    b,
                    Severity::Warning,
                    format!("{kind} block rendered natively: {err}"),
                ));
                self.nodes.push(native.into());
                self.markdown.push_str(&native_md);
            }
            Err(err) => {
                log::warn!(
                    "omitting {kind} block at lines {}-{}: {err}",
                    b.line_start,
                    b.line_end
                );
                self.diagnostics.push(RenderDiagnostic::new(
                    b,
                    Severity::Error,
                    format!("{kind} block omitted: {err}"),
                ));
                self.markdown.push_str(&native_md);
            }
        }
    }

    /// Stages the block's source lines in the host buffer, captures, and
    /// restores the buffer whatever the outcome.
    async fn rasterize(
        &mut self,
        b: &Block,
        kind: &'static str,
        element: &Element,
        theme: Theme,
    ) -> Result<(String, RasterizedImage), RasterError> {
        let s = self.settings;
        let dir = s.asset_directory.trim_matches('/');
        let path = format!("/{dir}/{kind}-widget-{}-{}.png", b.line_start, b.line_end);

        let original = self.host.buffer_content();
        let excerpt = self.host.get_range(b.line_start, b.line_end);
        self.host.set_buffer_content(&excerpt);
        self.host.refresh().await;

        let request = RasterRequest {
            kind,
            asset_path: path.clone(),
            target_width: s.target_width,
            scale: s.image_scale,
            smoothing: s.smoothing,
            theme,
            general_font: s.general_font.clone(),
            code_font: s.code_font.clone(),
            excerpt,
        };
        let result = self.rasterizer.render_to_image(element, &request).await;

        self.host.set_buffer_content(&original);
        self.host.refresh().await;
        result.map(|img| (path, img))
    }
}

/// Fence long enough not to be closed by any backtick run in `content`.
fn fence_len(content: &str) -> usize {
    content
        .lines()
        .map(|l| l.trim_start().chars().take_while(|&c| c == '`').count())
        .max()
        .map_or(3, |n| (n + 1).max(3))
}

fn first_image(tokens: &[Token]) -> Option<MainImage> {
    tokens.iter().find_map(|t| match t {
        Token::Image {
            url, alt, caption, ..
        } => Some(MainImage {
            url: url.clone(),
            alt: alt.clone(),
            caption: caption.clone(),
        }),
        _ => None,
    })
}

fn token_text(t: &Token) -> String {
    match t {
        Token::Text(s) | Token::Code(s) | Token::Math(s) => s.clone(),
        Token::Link { text, .. } => text.clone(),
        Token::Break => " ".to_string(),
        _ => String::new(),
    }
}

/// Points `#fragment` links whose slug names a heading at that heading.
fn rewrite_fragments(tree: &mut Element, toc: &Toc) {
    tree.walk_mut(&mut |e: &mut Element| {
        if e.tag != "a" || e.has_class("footnote-ref") {
            return;
        }
        let Some(fragment) = e.get_attr("href").and_then(|h| h.strip_prefix('#')) else {
            return;
        };
        if let Some(anchor) = toc.resolve_fragment(fragment) {
            let href = format!("#{anchor}");
            e.set_attr("href", href);
        }
    });
}
