/// Inline math delimiters, `$x$` and `$$x$$`.
pub struct InlineMath;

impl InlineMath {
    pub const DOLLAR: char = '$';
    pub const DISPLAY: &'static str = "$$";
    pub const ESCAPE: char = '\\';

    /// Offset of the next unescaped single `$` in `s`.
    pub fn find_close(s: &str) -> Option<usize> {
        let mut escaped = false;
        for (i, c) in s.char_indices() {
            match c {
                _ if escaped => escaped = false,
                Self::ESCAPE => escaped = true,
                Self::DOLLAR => return Some(i),
                _ => {}
            }
        }
        None
    }
}
