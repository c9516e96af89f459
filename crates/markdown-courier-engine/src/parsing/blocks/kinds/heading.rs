/// ATX heading: `#` x 1-6 at column 0, then a space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns `(level, text)` for a heading line.
    pub fn open(line: &str) -> Option<(u8, &str)> {
        let level = line.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let rest = line[level..].strip_prefix(' ')?;
        Some((level as u8, rest.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some((1, "Title")))]
    #[case("###### Deep", Some((6, "Deep")))]
    #[case("####### Too deep", None)]
    #[case("#hashtag", None)]
    #[case(" # indented", None)]
    #[case("## ", Some((2, "")))]
    fn heading_lines(#[case] line: &str, #[case] expected: Option<(u8, &str)>) {
        assert_eq!(Heading::open(line), expected);
    }
}
