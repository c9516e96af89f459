use futures::executor::block_on;
use markdown_courier_engine::render::PngConversion;
use markdown_courier_engine::{
    MemoryBuffer, NoRasterizer, RenderOutput, RenderSettings, Severity, render_markdown,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn native_settings() -> RenderSettings {
    RenderSettings {
        png: PngConversion {
            code: false,
            table: false,
            math: false,
            callout: false,
        },
        ..Default::default()
    }
}

fn render_with(md: &str, settings: &RenderSettings) -> RenderOutput {
    let mut host = MemoryBuffer::new(md);
    block_on(render_markdown(md, settings, &NoRasterizer, &mut host))
}

const FULL_DOCUMENT: &str = "\
# Title

Intro with **bold**, ~~old~~ and [a link](https://example.com).

- a
- b *c*

1. one
2. two

> quoted
> twice

>> pulled

> [!tip] Remember
> the body

---

```rs main.rs
fn main() {}
```

    indented line

| a | b |
| --- | --- |
| 1 | **2** |

$$
e^{i\\pi} = -1
$$

See [^n] and [^m].

[^m]: Second note.
[^n]: First note
  continued.";

const ESCAPED_TEXT: &str = "\
keep a \\*b\\* literal

\\# not a heading

\\- not a list

1\\. not ordered

\\> not a quote

price \\$5 and snake\\_case

\\~\\~kept\\~\\~ \\=\\=kept\\=\\= \\[x](y) \\![alt](a.png) see \\^ref";

#[rstest]
#[case::full_document(FULL_DOCUMENT)]
#[case::anchors("para one\n\n\npara two ^pid\n\n- item ^lid\n\n## Sec ^s")]
#[case::images("![cover|300x200](cover.png \"Cover\")\n\ntext ![inline](a.png) more")]
#[case::nested_emphasis("**bold *and italic* text** ==mark== ~~gone~~")]
#[case::code_with_backtick("use ``a`b`` here")]
#[case::escapes(ESCAPED_TEXT)]
#[case::close_and_reopen("*a **b* c**")]
#[case::lonely_anchor("^lonely\n\nafter")]
fn canonical_markdown_renders_to_the_same_tree(#[case] md: &str) {
    let settings = native_settings();
    let first = render_with(md, &settings);
    assert!(first.diagnostics.is_empty(), "{:?}", first.diagnostics);
    let second = render_with(&first.canonical_markdown, &settings);
    assert_eq!(second.element_tree, first.element_tree);
    assert_eq!(second.canonical_markdown, first.canonical_markdown);
}

#[test]
fn literal_markup_characters_stay_escaped() {
    let out = render_with(ESCAPED_TEXT, &native_settings());
    assert_eq!(out.canonical_markdown, format!("{ESCAPED_TEXT}\n"));
    assert!(!out.to_html().contains("<em>"));
}

#[test]
fn lonely_anchor_stays_text() {
    let out = render_with("^lonely\n\nafter", &native_settings());
    assert_eq!(out.canonical_markdown, "\\^lonely\n\nafter\n");
    assert!(out.to_html().contains("<p>^lonely</p>"));
}

#[test]
fn footnotes_number_by_first_reference() {
    let out = render_with(
        "[^a]: Alpha.\n[^b]: Beta.\n\nFirst [^b], then [^a], again [^b].",
        &native_settings(),
    );
    assert_eq!(out.footnotes.number("b"), Some(1));
    assert_eq!(out.footnotes.number("a"), Some(2));
    assert!(out.canonical_markdown.contains("First [^1], then [^2], again [^1]."));
    assert!(out.canonical_markdown.ends_with("[^1]: Beta.\n[^2]: Alpha.\n"));
}

#[test]
fn footnotes_inside_footnotes_are_rendered() {
    let out = render_with("Top [^a].\n\n[^a]: Points at [^b].\n[^b]: Leaf.", &native_settings());
    assert_eq!(out.footnotes.len(), 2);
    assert!(out.canonical_markdown.ends_with("[^1]: Points at [^2].\n[^2]: Leaf.\n"));
}

#[test]
fn heading_ids_are_stable_across_runs() {
    let md = "# T\n\nbody\n\n# One\n### Deep\n## Two\n## Two\n# Three";
    let ids = |out: &RenderOutput| {
        let mut ids = vec![];
        let mut tree = out.element_tree.clone();
        tree.walk_mut(&mut |e: &mut markdown_courier_engine::Element| {
            if e.tag.len() == 2 && e.tag.starts_with('h') && e.tag != "hr" {
                ids.push(e.get_attr("id").unwrap_or_default().to_string());
            }
        });
        ids
    };
    let a = render_with(md, &native_settings());
    let b = render_with(md, &native_settings());
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(
        ids(&a),
        vec!["t", "1-one", "1.1.1-deep", "1.2-two", "1.3-two", "2-three"]
    );
    insta::assert_snapshot!(a.toc_markdown.unwrap_or_default(), @r"
    # Table of Contents
    1. [One](#1-one)
        1. [Deep](#1.1.1-deep)
      2. [Two](#1.2-two)
      3. [Two](#1.3-two)
    2. [Three](#2-three)
    ");
}

#[test]
fn raw_markdown_prefixes_the_toc() {
    let out = render_with("Intro\n\n## Part", &native_settings());
    assert_eq!(
        out.raw_markdown(),
        "# Table of Contents\n  1. [Part](#1.1-part)\n\nIntro\n\n## Part\n"
    );

    let settings = RenderSettings {
        create_toc: false,
        ..native_settings()
    };
    let out = render_with("Intro\n\n## Part", &settings);
    assert_eq!(out.raw_markdown(), "Intro\n\n## Part\n");
}

#[test]
fn missing_rasterizer_falls_back_per_block() {
    let out = render_with(
        "```haskell\nmain = pure ()\n```\n\n$$\nx\n$$",
        &RenderSettings::default(),
    );
    let lines: Vec<_> = out
        .diagnostics
        .iter()
        .map(|d| (d.line_start, d.line_end, d.severity))
        .collect();
    assert_eq!(lines, vec![(0, 2, Severity::Warning), (4, 6, Severity::Warning)]);
    assert!(out.to_html().contains("main = pure ()"));
}
