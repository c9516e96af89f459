/// List item markers: `-`, `*`, `+` or `N.` followed by a space.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    pub const ORDINAL_SUFFIX: char = '.';

    /// Returns `(ordered, item_text)` for a list line.
    pub fn open(line: &str) -> Option<(bool, &str)> {
        let t = line.trim_start();
        let mut chars = t.chars();
        let first = chars.next()?;
        if Self::BULLETS.contains(&first) {
            return t[1..].strip_prefix(' ').map(|rest| (false, rest.trim_start()));
        }
        let digits = t.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let rest = t[digits..].strip_prefix(Self::ORDINAL_SUFFIX)?.strip_prefix(' ')?;
        Some((true, rest.trim_start()))
    }
}
