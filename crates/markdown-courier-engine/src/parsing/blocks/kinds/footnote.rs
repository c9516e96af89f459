/// Footnote definition: `[^id]: text`, continued by lines indented two spaces.
pub struct FootnoteDef;

impl FootnoteDef {
    pub const OPEN: &'static str = "[^";
    pub const CLOSE: &'static str = "]:";
    pub const CONTINUATION: &'static str = "  ";

    /// Returns `(id, first_line_text)` for a definition line.
    pub fn open(line: &str) -> Option<(&str, &str)> {
        let inner = line.strip_prefix(Self::OPEN)?;
        let close = inner.find(']')?;
        let id = &inner[..close];
        if id.is_empty() || id.contains(char::is_whitespace) {
            return None;
        }
        let rest = inner[close..].strip_prefix(Self::CLOSE)?;
        Some((id, rest.trim()))
    }

    pub fn continues(line: &str) -> bool {
        line.starts_with(Self::CONTINUATION) && !line.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_line() {
        assert_eq!(FootnoteDef::open("[^1]: A note."), Some(("1", "A note.")));
        assert_eq!(FootnoteDef::open("[^long-id]:tight"), Some(("long-id", "tight")));
    }

    #[test]
    fn reference_is_not_a_definition() {
        assert_eq!(FootnoteDef::open("[^1] is referenced"), None);
        assert_eq!(FootnoteDef::open("[^]: empty"), None);
    }

    #[test]
    fn continuation_requires_indent_and_text() {
        assert!(FootnoteDef::continues("  more text"));
        assert!(!FootnoteDef::continues(" one space"));
        assert!(!FootnoteDef::continues("    "));
    }
}
