use crate::parsing::blocks::types::QuoteKind;

/// The opening line of a quote: plain, pull or callout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOpen {
    pub kind: QuoteKind,
    /// Callout name from a leading `[!name]`.
    pub callout: Option<String>,
}

/// Blockquote, pullquote and callout syntax.
///
/// Continuation lines must stay quote-prefixed; the first line that is not
/// ends the quote.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
    pub const PULL: &'static str = ">>";
    pub const CALLOUT_OPEN: &'static str = "[!";
    pub const CALLOUT_CLOSE: char = ']';

    pub fn is_quote_line(line: &str) -> bool {
        line.trim_start().starts_with(Self::PREFIX)
    }

    pub fn open(line: &str) -> Option<QuoteOpen> {
        let t = line.trim_start();
        if !t.starts_with(Self::PREFIX) {
            return None;
        }
        if t.starts_with(Self::PULL) {
            return Some(QuoteOpen {
                kind: QuoteKind::Pullquote,
                callout: None,
            });
        }
        let callout = Self::callout_name(&Self::strip(t, QuoteKind::Blockquote)).map(|(name, _)| name);
        Some(QuoteOpen {
            kind: QuoteKind::Blockquote,
            callout,
        })
    }

    /// Removes the quote marker plus one following space.
    pub fn strip(line: &str, kind: QuoteKind) -> String {
        let t = line.trim_start();
        let rest = match kind {
            QuoteKind::Pullquote if t.starts_with(Self::PULL) => &t[Self::PULL.len()..],
            _ => t.strip_prefix(Self::PREFIX).unwrap_or(t),
        };
        rest.strip_prefix(' ').unwrap_or(rest).to_string()
    }

    /// Splits `[!name] title` into the name and the remaining title text.
    pub fn callout_name(body: &str) -> Option<(String, &str)> {
        let t = body.trim_start();
        let inner = t.strip_prefix(Self::CALLOUT_OPEN)?;
        let close = inner.find(Self::CALLOUT_CLOSE)?;
        let name = inner[..close].trim();
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), inner[close + 1..].trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_not_a_quote() {
        assert_eq!(BlockQuote::open("hello"), None);
    }

    #[test]
    fn single_marker_is_blockquote() {
        let q = BlockQuote::open("> hello").unwrap();
        assert_eq!(q.kind, QuoteKind::Blockquote);
        assert_eq!(q.callout, None);
    }

    #[test]
    fn double_marker_is_pullquote() {
        let q = BlockQuote::open(">> pulled").unwrap();
        assert_eq!(q.kind, QuoteKind::Pullquote);
    }

    #[test]
    fn callout_marker_names_the_callout() {
        let q = BlockQuote::open("> [!warning] Careful").unwrap();
        assert_eq!(q.callout.as_deref(), Some("warning"));
        assert_eq!(
            BlockQuote::callout_name("[!note] Title"),
            Some(("note".to_string(), "Title"))
        );
    }

    #[test]
    fn strip_removes_marker_and_one_space() {
        assert_eq!(BlockQuote::strip(">  two", QuoteKind::Blockquote), " two");
        assert_eq!(BlockQuote::strip(">> pulled", QuoteKind::Pullquote), "pulled");
        assert_eq!(BlockQuote::strip("> cont", QuoteKind::Pullquote), "cont");
        assert_eq!(BlockQuote::strip(">", QuoteKind::Blockquote), "");
    }
}
