/// Explicit block anchors written as `^id`.
pub struct Anchor;

impl Anchor {
    pub const PREFIX: char = '^';

    pub fn is_id_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-'
    }

    fn is_id(s: &str) -> bool {
        !s.is_empty() && s.chars().all(Self::is_id_char)
    }

    /// A line that is only `^id`, starting at column 0.
    pub fn standalone(line: &str) -> Option<&str> {
        let id = line.trim_end().strip_prefix(Self::PREFIX)?;
        Self::is_id(id).then_some(id)
    }

    /// Splits a trailing ` ^id` off `text`.
    ///
    /// The `^` must start the text or follow whitespace. The returned text is
    /// trimmed at the end either way.
    pub fn split_trailing(text: &str) -> (&str, Option<String>) {
        let t = text.trim_end();
        if let Some(pos) = t.rfind(Self::PREFIX) {
            let id = &t[pos + 1..];
            let before = &t[..pos];
            let boundary = before.is_empty() || before.ends_with(char::is_whitespace);
            if boundary && Self::is_id(id) {
                return (before.trim_end(), Some(id.to_string()));
            }
        }
        (t, None)
    }
}
