/// Markdown link, image and footnote-reference delimiters.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';
    pub const URL_OPEN: char = '(';
    pub const URL_CLOSE: char = ')';
    pub const IMAGE: char = '!';
    pub const FOOTNOTE: &'static str = "[^";
    /// Quote characters accepted around an image caption.
    pub const CAPTION_QUOTES: [char; 3] = ['"', '\'', '`'];

    /// Splits `url "caption"` into the url and the unquoted caption.
    pub fn split_target(target: &str) -> (&str, Option<&str>) {
        let target = target.trim();
        let Some((url, rest)) = target.split_once(char::is_whitespace) else {
            return (target, None);
        };
        let rest = rest.trim();
        let caption = Self::CAPTION_QUOTES.iter().find_map(|&q| {
            rest.strip_prefix(q)
                .and_then(|r| r.strip_suffix(q))
        });
        (url, caption.or((!rest.is_empty()).then_some(rest)))
    }
}
