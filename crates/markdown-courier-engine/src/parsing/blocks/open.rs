use super::{
    classify::LineClass,
    kinds::{
        Anchor, FenceOpen, FootnoteDef, Heading, IndentedCode, ListItem, MathStart, QuoteOpen,
        Rule, Table, TableHead,
    },
};

/// A construct detected at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    Blank,
    Table(TableHead),
    Fence(FenceOpen),
    Heading { level: u8, text: &'a str },
    Rule,
    ListItem { ordered: bool, text: &'a str },
    Footnote { id: &'a str, text: &'a str },
    Anchor { id: &'a str },
    Quote(QuoteOpen),
    Math(MathStart),
    IndentedCode { text: &'a str },
}

/// Tests constructs in their fixed priority order.
///
/// `next` is the following line, needed to confirm a table divider.
/// Returns `None` for plain paragraph text.
pub fn try_open<'a>(c: &LineClass<'a>, next: Option<&str>) -> Option<BlockOpen<'a>> {
    if c.is_blank {
        return Some(BlockOpen::Blank);
    }
    if let Some(head) = Table::open(c.text, next) {
        return Some(BlockOpen::Table(head));
    }
    if let Some(fence) = &c.fence {
        return Some(BlockOpen::Fence(fence.clone()));
    }
    if let Some((level, text)) = Heading::open(c.text) {
        return Some(BlockOpen::Heading { level, text });
    }
    if Rule::matches(c.text) {
        return Some(BlockOpen::Rule);
    }
    if let Some((ordered, text)) = ListItem::open(c.text) {
        return Some(BlockOpen::ListItem { ordered, text });
    }
    if let Some((id, text)) = FootnoteDef::open(c.text) {
        return Some(BlockOpen::Footnote { id, text });
    }
    if let Some(id) = Anchor::standalone(c.text) {
        return Some(BlockOpen::Anchor { id });
    }
    if let Some(quote) = &c.quote {
        return Some(BlockOpen::Quote(quote.clone()));
    }
    if let Some(math) = c.math {
        return Some(BlockOpen::Math(math));
    }
    IndentedCode::open(c.text).map(|text| BlockOpen::IndentedCode { text })
}
