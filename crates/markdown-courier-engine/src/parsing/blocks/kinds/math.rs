/// Math delimiters found in running text.
pub struct Math;

/// Where a math run starts within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathStart {
    /// Byte offset of the opening `$`.
    pub at: usize,
    /// `true` for `$$`, which may span lines.
    pub display: bool,
    /// For inline `$`, the byte offset of the closing `$`.
    pub close: Option<usize>,
}

impl Math {
    pub const DOLLAR: char = '$';
    pub const DISPLAY: &'static str = "$$";

    /// Finds the first unescaped math opener in `line`.
    ///
    /// A single `$` only counts when it closes later on the same line;
    /// otherwise it is literal and the search continues past it.
    pub fn find(line: &str) -> Option<MathStart> {
        let b = line.as_bytes();
        let mut i = 0usize;
        while i < b.len() {
            match b[i] {
                b'\\' => i += 2,
                b'$' if b.get(i + 1) == Some(&b'$') => {
                    return Some(MathStart {
                        at: i,
                        display: true,
                        close: None,
                    });
                }
                b'$' => {
                    if let Some(close) = Self::find_close(line, i + 1) {
                        return Some(MathStart {
                            at: i,
                            display: false,
                            close: Some(close),
                        });
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
        None
    }

    /// Next unescaped single `$` at or after `from`, with non-empty content.
    fn find_close(line: &str, from: usize) -> Option<usize> {
        let b = line.as_bytes();
        let mut i = from;
        while i < b.len() {
            match b[i] {
                b'\\' => i += 2,
                b'$' if i > from => return Some(i),
                b'$' => return None,
                _ => i += 1,
            }
        }
        None
    }

    /// Byte offset of the closing `$$` in `s`, if any.
    pub fn find_display_close(s: &str) -> Option<usize> {
        s.find(Self::DISPLAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_math_closes_on_same_line() {
        let m = Math::find("area is $\\pi r^2$ here").unwrap();
        assert_eq!(m.at, 8);
        assert!(!m.display);
        assert_eq!(m.close, Some(16));
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(Math::find("costs $5 today"), None);
        assert_eq!(Math::find("empty $$"), Some(MathStart { at: 6, display: true, close: None }));
    }

    #[test]
    fn escaped_dollar_is_skipped() {
        assert_eq!(Math::find(r"price \$4 and \$5"), None);
        let m = Math::find(r"\$ then $x$").unwrap();
        assert_eq!(m.at, 8);
    }

    #[test]
    fn display_math_opener() {
        let m = Math::find("$$").unwrap();
        assert!(m.display);
        assert_eq!(Math::find_display_close("x + y$$ rest"), Some(5));
    }
}
