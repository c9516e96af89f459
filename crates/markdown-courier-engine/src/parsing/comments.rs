use std::borrow::Cow;

/// Comment delimiter; everything between a pair is dropped.
pub const COMMENT: &str = "%%";

/// Removes `%%…%%` regions, which may span lines. An unterminated comment
/// runs to the end of the document.
///
/// Newlines inside a comment are kept, so every line keeps its index.
pub fn strip_comments(src: &str) -> Cow<'_, str> {
    if !src.contains(COMMENT) {
        return Cow::Borrowed(src);
    }
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(start) = rest.find(COMMENT) {
        out.push_str(&rest[..start]);
        let inside = &rest[start + COMMENT.len()..];
        let (dropped, after) = match inside.find(COMMENT) {
            Some(end) => (&inside[..end], &inside[end + COMMENT.len()..]),
            None => (inside, ""),
        };
        out.extend(dropped.matches('\n').map(|_| '\n'));
        rest = after;
    }
    out.push_str(rest);
    Cow::Owned(out)
}
