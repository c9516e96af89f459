use std::collections::HashMap;

use serde::Serialize;

use crate::render::{element::Element, settings::TocStyle};

pub const TOC_TITLE: &str = "Table of Contents";

/// Lowercase, non-alphanumerics collapsed to single dashes.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// A heading registered in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocHeading {
    pub text: String,
    /// `{index path}-{slug}`, e.g. `1.2-setup`.
    pub id: String,
    /// What links point at: the heading's explicit `^id`, else `id`.
    pub anchor: String,
}

/// One outline level. Placeholders (`heading: None`) fill skipped levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocNode {
    pub level: u8,
    pub heading: Option<TocHeading>,
    pub children: Vec<TocNode>,
}

/// Stack-based outline builder.
///
/// A heading of level L pops the stack until the top is shallower than L,
/// then becomes a child of the top (or a new root).
#[derive(Debug, Default)]
pub struct TocBuilder {
    roots: Vec<TocNode>,
    /// Child-index path from the roots to the node on top of the stack.
    path: Vec<usize>,
    levels: Vec<u8>,
    slugs: HashMap<String, String>,
}

impl TocBuilder {
    /// Registers a heading and returns its outline entry.
    pub fn push(&mut self, level: u8, text: &str, explicit: Option<&str>) -> TocHeading {
        while self.levels.last().is_some_and(|&top| top >= level) {
            self.levels.pop();
            self.path.pop();
        }
        let mut next = self.levels.last().map_or(1, |l| l + 1);
        while next < level {
            self.attach(TocNode {
                level: next,
                heading: None,
                children: vec![],
            });
            next += 1;
        }

        let slug = slugify(text);
        let mut id = self.attach(TocNode {
            level,
            heading: None,
            children: vec![],
        });
        id.push('-');
        id.push_str(&slug);
        let heading = TocHeading {
            text: text.to_string(),
            anchor: explicit.map_or_else(|| id.clone(), str::to_string),
            id,
        };
        self.slugs.entry(slug).or_insert_with(|| heading.anchor.clone());
        if let Some(node) = self.top_mut() {
            node.heading = Some(heading.clone());
        }
        heading
    }

    /// Appends `node` under the top of the stack, pushes it, and returns its
    /// dot-joined 1-based index path.
    fn attach(&mut self, node: TocNode) -> String {
        let level = node.level;
        let Some(siblings) = children_at(&mut self.roots, &self.path) else {
            return String::new();
        };
        siblings.push(node);
        let idx = siblings.len() - 1;
        self.path.push(idx);
        self.levels.push(level);
        self.path
            .iter()
            .map(|i| (i + 1).to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    fn top_mut(&mut self) -> Option<&mut TocNode> {
        let (last, parents) = self.path.split_last()?;
        children_at(&mut self.roots, parents)?.get_mut(*last)
    }

    pub fn finish(self) -> Toc {
        Toc {
            roots: self.roots,
            slugs: self.slugs,
        }
    }
}

fn children_at<'t>(roots: &'t mut Vec<TocNode>, path: &[usize]) -> Option<&'t mut Vec<TocNode>> {
    let mut nodes = roots;
    for &i in path {
        nodes = &mut nodes.get_mut(i)?.children;
    }
    Some(nodes)
}

/// The finished outline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Toc {
    pub roots: Vec<TocNode>,
    /// Heading slug → anchor, for rewriting `#fragment` links.
    #[serde(skip)]
    slugs: HashMap<String, String>,
}

impl Toc {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Anchor of the heading whose slug matches a link fragment.
    pub fn resolve_fragment(&self, fragment: &str) -> Option<&str> {
        let fragment = fragment.replace("%20", " ");
        self.slugs.get(&slugify(&fragment)).map(String::as_str)
    }

    /// Pre-order `(depth-indent level, sibling number, heading)` for every
    /// real heading; placeholders only contribute depth.
    fn entries(&self) -> Vec<(u8, usize, &TocHeading)> {
        fn walk<'t>(nodes: &'t [TocNode], out: &mut Vec<(u8, usize, &'t TocHeading)>) {
            for (i, n) in nodes.iter().enumerate() {
                if let Some(h) = &n.heading {
                    out.push((n.level, i + 1, h));
                }
                walk(&n.children, out);
            }
        }
        let mut out = vec![];
        walk(&self.roots, &mut out);
        out
    }

    pub fn to_markdown(&self, style: TocStyle) -> String {
        let mut out = format!("# {TOC_TITLE}\n");
        for (level, n, h) in self.entries() {
            let indent = "  ".repeat(usize::from(level.saturating_sub(1)));
            let bullet = match style {
                TocStyle::Numbered => format!("{n}."),
                TocStyle::Bulleted => "-".to_string(),
            };
            out.push_str(&format!("{indent}{bullet} [{}](#{})\n", h.text, h.anchor));
        }
        out
    }

    /// `pre > code` block listing every heading as a link.
    pub fn to_element(&self, style: TocStyle) -> Element {
        let mut code = Element::new("code")
            .child(Element::new("strong").text_child(TOC_TITLE))
            .text_child("\n");
        for (level, n, h) in self.entries() {
            let indent = "\t".repeat(usize::from(level.saturating_sub(1)));
            let bullet = match style {
                TocStyle::Numbered => format!("{n}."),
                TocStyle::Bulleted => "-".to_string(),
            };
            let link = Element::new("a")
                .attr("href", format!("#{}", h.anchor))
                .attr("target", "_self")
                .text_child(&h.text);
            code = code.child(
                Element::new("span")
                    .text_child(format!("{indent}{bullet} "))
                    .child(link)
                    .text_child("\n"),
            );
        }
        Element::new("pre")
            .attr("data-code-block-mode", "0")
            .child(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn build(headings: &[(u8, &str)]) -> (Vec<String>, Toc) {
        let mut b = TocBuilder::default();
        let ids = headings
            .iter()
            .map(|(l, t)| b.push(*l, t, None).id)
            .collect();
        (ids, b.finish())
    }

    #[test]
    fn slugs_collapse_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  A -- b  "), "a-b");
        assert_eq!(slugify("Ünïcode 2"), "ünïcode-2");
    }

    #[test]
    fn ids_follow_index_paths() {
        let (ids, _) = build(&[(1, "Intro"), (2, "Setup"), (2, "Usage"), (1, "End")]);
        assert_eq!(ids, vec!["1-intro", "1.1-setup", "1.2-usage", "2-end"]);
    }

    #[test]
    fn skipped_levels_get_placeholders() {
        let (ids, toc) = build(&[(1, "A"), (3, "C"), (2, "B")]);
        assert_eq!(ids, vec!["1-a", "1.1.1-c", "1.2-b"]);
        let a = &toc.roots[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].heading, None);
        assert_eq!(a.children[0].children[0].level, 3);
    }

    #[test]
    fn first_heading_deeper_than_h1() {
        let (ids, _) = build(&[(2, "Deep"), (1, "Top")]);
        assert_eq!(ids, vec!["1.1-deep", "2-top"]);
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let hs = [(1, "One"), (3, "Three"), (2, "Two"), (2, "Two")];
        assert_eq!(build(&hs).0, build(&hs).0);
    }

    #[test]
    fn explicit_anchor_wins_for_links() {
        let mut b = TocBuilder::default();
        let h = b.push(1, "Setup Guide", Some("setup"));
        assert_eq!(h.id, "1-setup-guide");
        assert_eq!(h.anchor, "setup");
        let toc = b.finish();
        assert_eq!(toc.resolve_fragment("Setup%20Guide"), Some("setup"));
        assert_eq!(toc.resolve_fragment("setup-guide"), Some("setup"));
        assert_eq!(toc.resolve_fragment("missing"), None);
    }

    #[test]
    fn numbered_markdown() {
        let (_, toc) = build(&[(1, "Intro"), (2, "Setup"), (1, "End")]);
        assert_snapshot!(toc.to_markdown(TocStyle::Numbered), @r"
        # Table of Contents
        1. [Intro](#1-intro)
          1. [Setup](#1.1-setup)
        2. [End](#2-end)
        ");
    }

    #[test]
    fn bulleted_markdown() {
        let (_, toc) = build(&[(1, "Intro"), (2, "Setup")]);
        assert_snapshot!(toc.to_markdown(TocStyle::Bulleted), @r"
        # Table of Contents
        - [Intro](#1-intro)
          - [Setup](#1.1-setup)
        ");
    }

    #[test]
    fn element_lists_links() {
        let (_, toc) = build(&[(1, "Intro")]);
        assert_eq!(
            toc.to_element(TocStyle::Numbered).to_html(),
            concat!(
                r#"<pre data-code-block-mode="0"><code><strong>Table of Contents</strong>"#,
                "\n",
                r##"<span>1. <a href="#1-intro" target="_self">Intro</a>"##,
                "\n</span></code></pre>"
            )
        );
    }
}
