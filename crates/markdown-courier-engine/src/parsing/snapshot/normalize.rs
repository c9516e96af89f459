use serde::Serialize;
use xi_rope::Rope;

use crate::parsing::{
    blocks::{Block, BlockKind},
    inline::Token,
    rope::preview,
    tokenize_for_block,
};

#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub lines: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub inline: Vec<String>,
}

/// One compact string per token, e.g. `Text("a")`, `Strong`, `Link(url|text)`.
pub fn token_label(tok: &Token) -> String {
    match tok {
        Token::Text(s) => format!("Text({s:?})"),
        Token::Strong => "Strong".into(),
        Token::Em => "Em".into(),
        Token::Strike => "Strike".into(),
        Token::Mark => "Mark".into(),
        Token::Code(s) => format!("Code({s:?})"),
        Token::Math(s) => format!("Math({s:?})"),
        Token::Link { url, text } => format!("Link({url}|{text})"),
        Token::Image { url, alt, .. } => format!("Image({url}|{alt})"),
        Token::FootnoteRef { id } => format!("FootnoteRef({id})"),
        Token::Break => "Break".into(),
    }
}

fn kind_label(kind: &BlockKind) -> String {
    match kind {
        BlockKind::Heading { level } => format!("Heading({level})"),
        BlockKind::List { ordered } => format!("List(ordered={ordered})"),
        BlockKind::CodeBlock { language, .. } => format!("CodeBlock({language})"),
        BlockKind::Table { body } => format!("Table({}x{})", body.len(), body.first().map_or(0, Vec::len)),
        BlockKind::Quote { kind } => format!("Quote({kind:?})"),
        BlockKind::Callout { name } => format!("Callout({name})"),
        BlockKind::Footnote { id } => format!("Footnote({id})"),
        BlockKind::Break { count } => format!("Break({count})"),
        other => format!("{other:?}"),
    }
}

pub fn normalize(rope: &Rope, blocks: &[Block]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| BlockSnap {
            kind: kind_label(&b.kind),
            lines: (b.line_start, b.line_end),
            id: b.id.clone(),
            source: preview(rope, b.span, 60),
            inline: tokenize_for_block(b).iter().map(token_label).collect(),
        })
        .collect();
    Snap { blocks }
}
