/// A code line indented by a tab or at least four spaces.
///
/// Tested after every other construct, one block per line.
pub struct IndentedCode;

impl IndentedCode {
    pub const TAB: char = '\t';
    pub const SPACES: &'static str = "    ";

    pub fn open(line: &str) -> Option<&str> {
        line.strip_prefix(Self::TAB)
            .or_else(|| line.strip_prefix(Self::SPACES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_or_four_spaces() {
        assert_eq!(IndentedCode::open("\tlet x = 1;"), Some("let x = 1;"));
        assert_eq!(IndentedCode::open("      deeper"), Some("  deeper"));
        assert_eq!(IndentedCode::open("   three"), None);
    }
}
