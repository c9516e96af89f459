/// Wiki-style link delimiters: `[[target]]`, `[[target|alias]]`,
/// `![[image.png|300x200]]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const ALIAS: char = '|';

    /// Splits the text between the brackets into target and optional suffix.
    pub fn split(inner: &str) -> (&str, Option<&str>) {
        match inner.split_once(Self::ALIAS) {
            Some((target, suffix)) => (target.trim(), Some(suffix.trim())),
            None => (inner.trim(), None),
        }
    }
}
